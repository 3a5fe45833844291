//! Field：记录字段的三态包装（未赋值 / NULL / 有值），以及从驱动值写回字段。

use crate::value::SqlValue;

/// 从驱动返回的值转换时的错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("integer {value} is out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },
}

/// 从驱动原生值构造自身；不做类型转换，只接受对应的值类型。
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: SqlValue) -> Result<Self, FieldError>;
}

fn mismatch<T>(expected: &'static str, found: &SqlValue) -> Result<T, FieldError> {
    Err(FieldError::TypeMismatch {
        expected,
        found: found.type_name(),
    })
}

impl FromSqlValue for SqlValue {
    fn from_sql_value(value: SqlValue) -> Result<Self, FieldError> {
        Ok(value)
    }
}

impl FromSqlValue for bool {
    fn from_sql_value(value: SqlValue) -> Result<Self, FieldError> {
        match value {
            SqlValue::Bool(v) => Ok(v),
            other => mismatch("bool", &other),
        }
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(value: SqlValue) -> Result<Self, FieldError> {
        match value {
            SqlValue::I64(v) => Ok(v),
            other => mismatch("integer", &other),
        }
    }
}

macro_rules! from_sql_int {
    ($($t:ty),+ $(,)?) => {
        $(impl FromSqlValue for $t {
            fn from_sql_value(value: SqlValue) -> Result<Self, FieldError> {
                match value {
                    SqlValue::I64(v) => <$t>::try_from(v).map_err(|_| FieldError::OutOfRange {
                        value: v,
                        target: stringify!($t),
                    }),
                    other => mismatch("integer", &other),
                }
            }
        })+
    };
}

from_sql_int!(i32, i16, u32, u16, u8);

impl FromSqlValue for f64 {
    fn from_sql_value(value: SqlValue) -> Result<Self, FieldError> {
        match value {
            SqlValue::F64(v) => Ok(v),
            other => mismatch("float", &other),
        }
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: SqlValue) -> Result<Self, FieldError> {
        match value {
            SqlValue::String(v) => Ok(v.into_owned()),
            other => mismatch("text", &other),
        }
    }
}

/// 记录字段的三态：从未赋值的字段不会出现在写操作里；`Null` 会写入 NULL。
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Field<T> {
    /// `None` 映射为 `Null`。
    pub fn from_option(v: Option<T>) -> Self {
        match v {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset | Self::Null => None,
        }
    }

    pub fn set(&mut self, value: impl Into<T>) {
        *self = Self::Value(value.into());
    }

    pub fn set_null(&mut self) {
        *self = Self::Null;
    }

    /// 恢复为未赋值状态。
    pub fn clear(&mut self) {
        *self = Self::Unset;
    }
}

impl<T: Clone + Into<SqlValue>> Field<T> {
    /// 写操作使用的值；未赋值时返回 `None`。
    pub fn to_sql_value(&self) -> Option<SqlValue> {
        match self {
            Self::Unset => None,
            Self::Null => Some(SqlValue::Null),
            Self::Value(v) => Some(v.clone().into()),
        }
    }
}

impl<T: FromSqlValue> Field<T> {
    /// 用驱动返回的值覆盖字段，`Null` 写为 `Field::Null`。
    pub fn assign(&mut self, value: SqlValue) -> Result<(), FieldError> {
        *self = match value {
            SqlValue::Null => Self::Null,
            other => Self::Value(T::from_sql_value(other)?),
        };
        Ok(())
    }
}

impl<T> From<T> for Field<T> {
    fn from(v: T) -> Self {
        Self::Value(v)
    }
}
