//! SQL 参数值类型。

use std::borrow::Cow;
use std::fmt;

/// SQL 参数值。
///
/// `Literal` 与 `List` 不会直接作为参数绑定：前者原样拼入 SQL，后者展开为
/// 带括号的占位符序列。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(Cow<'static, str>),
    Literal(Literal),
    List(Vec<SqlValue>),
}

/// 调用方信任的原始 SQL 片段（不会转义，也不会成为参数）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub(crate) fragment: String,
}

impl Literal {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.fragment
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragment)
    }
}

/// literal：构造一个原样拼入的 SQL 片段，例如 `literal("NOW()")`。
pub fn literal(fragment: impl Into<String>) -> SqlValue {
    SqlValue::Literal(Literal::new(fragment))
}

/// list：构造一个参数列表，用于 `in` 之类的比较。
pub fn list<T: Into<SqlValue>>(items: impl IntoIterator<Item = T>) -> SqlValue {
    SqlValue::List(items.into_iter().map(Into::into).collect())
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I64(_) => "integer",
            Self::F64(_) => "float",
            Self::String(_) => "text",
            Self::Literal(_) => "literal",
            Self::List(_) => "list",
        }
    }

    /// 该值展开后会绑定的参数个数（字面量为 0，列表递归累加）。
    pub fn bound_count(&self) -> usize {
        match self {
            Self::Literal(_) => 0,
            Self::List(items) => items.iter().map(Self::bound_count).sum(),
            Self::Null | Self::Bool(_) | Self::I64(_) | Self::F64(_) | Self::String(_) => 1,
        }
    }
}

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! from_int {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for SqlValue {
            fn from(v: $t) -> Self {
                Self::I64(i64::from(v))
            }
        })+
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::F64(f64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<Literal> for SqlValue {
    fn from(v: Literal) -> Self {
        Self::Literal(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        Self::from_option(v)
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for SqlValue {
    fn from(v: Vec<T>) -> Self {
        list(v)
    }
}

impl<T: Into<SqlValue>, const N: usize> From<[T; N]> for SqlValue {
    fn from(v: [T; N]) -> Self {
        list(v)
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        // 绑定为最接近的驱动参数类型：文本
        let text = v
            .format(time::macros::format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .unwrap_or_else(|_| v.to_string());
        Self::String(Cow::Owned(text))
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Literal(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}
