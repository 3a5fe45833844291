//! Args：按占位符出现顺序保存参数，并给出执行时的位置绑定视图。

use crate::value::SqlValue;

/// 驱动侧最接近的参数类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Bool,
    Null,
    Int,
    /// 浮点数与文本都按字符串绑定。
    Str,
}

impl ParamKind {
    pub fn of(value: &SqlValue) -> Self {
        match value {
            SqlValue::Bool(_) => Self::Bool,
            SqlValue::Null => Self::Null,
            SqlValue::I64(_) => Self::Int,
            SqlValue::F64(_) | SqlValue::String(_) | SqlValue::Literal(_) | SqlValue::List(_) => {
                Self::Str
            }
        }
    }
}

/// 一个位置参数绑定：`position` 从 1 开始。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding<'a> {
    pub position: usize,
    pub value: &'a SqlValue,
    pub kind: ParamKind,
}

/// Args 存储 SQL 相关参数。
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Args {
    values: Vec<SqlValue>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add：追加一个参数并返回它的占位符。
    pub fn add(&mut self, value: impl Into<SqlValue>) -> &'static str {
        self.values.push(value.into());
        "?"
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value：按 1 开始的位置取参数。
    pub fn value(&self, position: usize) -> Option<&SqlValue> {
        position.checked_sub(1).and_then(|i| self.values.get(i))
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SqlValue> {
        self.values.iter()
    }

    /// Bindings：按 1..N 的顺序给出执行时的绑定信息。
    pub fn bindings(&self) -> Vec<Binding<'_>> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, value)| Binding {
                position: i + 1,
                value,
                kind: ParamKind::of(value),
            })
            .collect()
    }

    pub(crate) fn reset(&mut self) {
        self.values.clear();
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a SqlValue;
    type IntoIter = std::slice::Iter<'a, SqlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl PartialEq<Vec<SqlValue>> for Args {
    fn eq(&self, other: &Vec<SqlValue>) -> bool {
        &self.values == other
    }
}
