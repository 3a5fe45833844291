//! Criteria：一组 `字段 比较符 值`，由同一个布尔连接符串起来，构成一个括号分组。

use crate::value::SqlValue;
use std::borrow::Cow;

pub const DEFAULT_COMPARATOR: &str = "=";
pub const DEFAULT_JOINER: &str = "and";

#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    pub(crate) pairs: Vec<(String, SqlValue)>,
    pub(crate) comparator: Cow<'static, str>,
    pub(crate) joiner: Cow<'static, str>,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            pairs: Vec::new(),
            comparator: Cow::Borrowed(DEFAULT_COMPARATOR),
            joiner: Cow::Borrowed(DEFAULT_JOINER),
        }
    }
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个条件；按追加顺序输出。
    pub fn and(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.pairs.push((field.into(), value.into()));
        self
    }

    pub fn push(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        self.pairs.push((field.into(), value.into()));
    }

    /// 设置整组条件共用的比较符，例如 `<=`、`!=`、`in`。
    pub fn compare(mut self, comparator: impl Into<Cow<'static, str>>) -> Self {
        self.comparator = comparator.into();
        self
    }

    /// 设置条件之间的连接符，例如 `or`。
    pub fn joined_by(mut self, joiner: impl Into<Cow<'static, str>>) -> Self {
        self.joiner = joiner.into();
        self
    }

    pub fn comparator(&self) -> &str {
        &self.comparator
    }

    pub fn joiner(&self) -> &str {
        &self.joiner
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.pairs.iter().map(|(f, v)| (f.as_str(), v))
    }

    /// 复位为默认的 `=` / `and`（用于 `where not`）。
    pub(crate) fn with_defaults(self) -> Self {
        Self {
            pairs: self.pairs,
            ..Self::default()
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Criteria
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> From<Vec<(K, V)>> for Criteria
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Criteria
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }
}
