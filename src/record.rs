//! Record：记录类型的静态描述（表名、主键、字段与列的对应）以及行的映射。
//!
//! 一般不手写实现，而是用 [`record!`](crate::record!) 宏生成。

use crate::column::{SelectColumn, col};
use crate::executor::{Row, RowKey};
use crate::field::FieldError;
use crate::field_mapper::resolve_column;
use crate::query::QueryError;
use crate::value::SqlValue;

/// 记录层的错误。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("record `{record}` has no primary key value (`{table}.{column}` is unset)")]
    UnsetPrimaryKey {
        record: &'static str,
        table: &'static str,
        column: String,
    },
    #[error("record `{record}` does not declare {what}")]
    DescriptorMissing {
        record: &'static str,
        what: &'static str,
    },
    #[error("record `{record}` has nothing to update besides its primary key")]
    NothingToPatch { record: &'static str },
    #[error("cannot decode field `{field}`: {source}")]
    Decode {
        field: String,
        #[source]
        source: FieldError,
    },
    #[error(transparent)]
    Query(#[from] QueryError),
}

pub type RecordResult<T> = Result<T, RecordError>;

/// 单个字段的元信息：`column` 为空时由默认 field mapper 推导。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMeta {
    pub field: &'static str,
    pub column: &'static str,
}

impl ColumnMeta {
    pub fn column_name(&self) -> String {
        resolve_column(self.field, self.column)
    }
}

/// 记录类型的静态描述。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDescriptor {
    /// 类型名，只用于错误信息。
    pub record: &'static str,
    pub table: &'static str,
    /// 主键字段（字段名，不是列名）。
    pub primary_key: &'static str,
    pub columns: &'static [ColumnMeta],
}

impl RecordDescriptor {
    /// 检查描述是否完整；缺项时返回 [`RecordError::DescriptorMissing`]。
    pub fn validate(&self) -> RecordResult<&Self> {
        let missing = |what| RecordError::DescriptorMissing {
            record: self.record,
            what,
        };
        if self.table.is_empty() {
            return Err(missing("a table name"));
        }
        if self.columns.is_empty() {
            return Err(missing("any columns"));
        }
        if self.primary_key.is_empty() {
            return Err(missing("a primary key"));
        }
        if self.meta(self.primary_key).is_none() {
            return Err(missing("a column for its primary key"));
        }
        Ok(self)
    }

    pub fn meta(&self, field: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|m| m.field == field)
    }

    /// 字段对应的列名。
    pub fn column_of(&self, field: &str) -> Option<String> {
        self.meta(field).map(ColumnMeta::column_name)
    }

    pub fn primary_key_column(&self) -> String {
        self.column_of(self.primary_key)
            .unwrap_or_else(|| self.primary_key.to_string())
    }

    /// `table.column` 形式的 select 列；列名与字段名不同时以字段名为别名。
    pub fn select_columns(&self) -> Vec<SelectColumn> {
        self.columns
            .iter()
            .map(|meta| {
                let column = meta.column_name();
                let c = col(format!("{}.{column}", self.table));
                if column == meta.field {
                    c
                } else {
                    c.alias(meta.field)
                }
            })
            .collect()
    }
}

/// 可映射到一张表的记录类型。
pub trait Record: Default {
    fn descriptor() -> &'static RecordDescriptor;

    /// 已赋值字段的 `(字段名, 值)`，按声明顺序；未赋值字段不出现。
    fn field_values(&self) -> Vec<(&'static str, SqlValue)>;

    /// 按字段名写入一个驱动值；字段不存在时返回 `Ok(false)`。
    fn assign(&mut self, field: &str, value: SqlValue) -> RecordResult<bool>;

    /// 写操作使用的 `(列名, 值)`。
    fn writable_values(&self) -> RecordResult<Vec<(String, SqlValue)>> {
        let desc = Self::descriptor().validate()?;
        Ok(self
            .field_values()
            .into_iter()
            .filter_map(|(field, value)| desc.column_of(field).map(|column| (column, value)))
            .collect())
    }

    /// 主键的值；未赋值时返回 [`RecordError::UnsetPrimaryKey`]。
    fn primary_key(&self) -> RecordResult<SqlValue> {
        let desc = Self::descriptor().validate()?;
        self.field_values()
            .into_iter()
            .find_map(|(field, value)| (field == desc.primary_key).then_some(value))
            .ok_or_else(|| RecordError::UnsetPrimaryKey {
                record: desc.record,
                table: desc.table,
                column: desc.primary_key_column(),
            })
    }

    /// 由一行结果构造记录：键与字段名相同时直接写入，否则按列名找字段；
    /// 其余键与按序号的键都忽略。
    fn from_row(row: &Row) -> RecordResult<Self> {
        let desc = Self::descriptor().validate()?;
        let mut record = Self::default();
        for (key, value) in row.iter() {
            let RowKey::Name(name) = key else {
                continue;
            };
            if record.assign(name, value.clone())? {
                continue;
            }
            let by_column = desc
                .columns
                .iter()
                .find(|meta| meta.column_name() == *name)
                .map(|meta| meta.field);
            match by_column {
                Some(field) => {
                    record.assign(field, value.clone())?;
                }
                None => trace_ignored_key(desc.record, name),
            }
        }
        Ok(record)
    }
}

fn trace_ignored_key(_record: &str, _key: &str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "halo_query::record",
        record = _record,
        key = _key,
        "ignored row key"
    );
}
