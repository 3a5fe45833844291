//! 执行层：把语句交给外部驱动执行，按行取回结果。

use crate::args::Binding;
use crate::query::Query;
use crate::record::{Record, RecordError};
use crate::value::SqlValue;

/// 结果行中的键：驱动可能同时给出列名和列序号。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Name(String),
    Index(usize),
}

/// 一行结果，按驱动返回的顺序保存。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(RowKey, SqlValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由 `(列名, 值)` 构造一行。
    pub fn from_named<K, V>(cells: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<SqlValue>,
    {
        cells
            .into_iter()
            .map(|(k, v)| (RowKey::Name(k.into()), v.into()))
            .collect()
    }

    pub fn push(&mut self, key: RowKey, value: impl Into<SqlValue>) {
        self.cells.push((key, value.into()));
    }

    /// 按列名取值。
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.cells.iter().find_map(|(k, v)| match k {
            RowKey::Name(n) if n == name => Some(v),
            _ => None,
        })
    }

    /// 第一列的值。
    pub fn first(&self) -> Option<&SqlValue> {
        self.cells.first().map(|(_, v)| v)
    }

    /// 为每个命名列追加一个按序号的副本（部分驱动的默认取行方式）。
    pub fn with_indexes(mut self) -> Self {
        let indexed: Vec<(RowKey, SqlValue)> = self
            .cells
            .iter()
            .filter(|(k, _)| matches!(k, RowKey::Name(_)))
            .enumerate()
            .map(|(i, (_, v))| (RowKey::Index(i), v.clone()))
            .collect();
        self.cells.extend(indexed);
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RowKey, &SqlValue)> {
        self.cells.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(RowKey, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (RowKey, SqlValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// 外部驱动：预编译 `sql`，按位置绑定参数并执行，返回全部结果行。
///
/// 没有结果集的语句返回空 `Vec`。
pub trait Executor {
    type Error;

    fn query(&mut self, sql: &str, bindings: &[Binding<'_>]) -> Result<Vec<Row>, Self::Error>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    type Error = E::Error;

    fn query(&mut self, sql: &str, bindings: &[Binding<'_>]) -> Result<Vec<Row>, Self::Error> {
        (**self).query(sql, bindings)
    }
}

/// 执行并映射为记录时的错误。
#[derive(Debug, thiserror::Error)]
pub enum FetchError<E> {
    #[error("query execution failed: {0}")]
    Execute(#[source] E),
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl Query {
    /// Run：执行当前语句，返回结果行。
    pub fn run<E: Executor + ?Sized>(&self, executor: &mut E) -> Result<Vec<Row>, E::Error> {
        let bindings = self.bindings();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "halo_query::sql",
            sql = %self.sql(),
            params = bindings.len(),
            "run query"
        );

        executor.query(self.sql(), &bindings)
    }

    /// FetchColumn：执行并返回第一行第一列；没有结果时为 `None`。
    pub fn fetch_column<E: Executor + ?Sized>(
        &self,
        executor: &mut E,
    ) -> Result<Option<SqlValue>, E::Error> {
        let rows = self.run(executor)?;
        Ok(rows.into_iter().next().and_then(|row| row.first().cloned()))
    }

    /// FetchRecords：执行并把每一行映射为记录。
    pub fn fetch_records<T, E>(&self, executor: &mut E) -> Result<Vec<T>, FetchError<E::Error>>
    where
        T: Record,
        E: Executor + ?Sized,
    {
        let rows = self.run(executor).map_err(FetchError::Execute)?;
        rows.iter()
            .map(|row| T::from_row(row).map_err(FetchError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Row, RowKey};
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn get_by_name() {
        let row = Row::from_named([("id", SqlValue::I64(4)), ("make", "Honda".into())]);
        assert_eq!(row.get("make"), Some(&SqlValue::from("Honda")));
        assert_eq!(row.get("model"), None);
        assert_eq!(row.first(), Some(&SqlValue::I64(4)));
    }

    #[test]
    fn with_indexes_duplicates_named_cells() {
        let row = Row::from_named([("id", 4_i64), ("year", 1996)]).with_indexes();
        let keys: Vec<&RowKey> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                &RowKey::Name("id".into()),
                &RowKey::Name("year".into()),
                &RowKey::Index(0),
                &RowKey::Index(1),
            ]
        );
        assert_eq!(row.len(), 4);
    }
}
