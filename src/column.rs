//! select 列与 order by 项。

/// select 列：表达式加可选别名。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectColumn {
    pub(crate) expr: String,
    pub(crate) alias: Option<String>,
}

impl SelectColumn {
    pub fn new(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            alias: None,
        }
    }

    /// 生成 `expr as alias`。
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// col：`col("brief_description").alias("briefDescription")`。
pub fn col(expr: impl Into<String>) -> SelectColumn {
    SelectColumn::new(expr)
}

impl From<&str> for SelectColumn {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for SelectColumn {
    fn from(v: String) -> Self {
        Self::new(v)
    }
}

/// order by 项：字段加可选方向（方向原样输出）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    pub(crate) field: String,
    pub(crate) direction: Option<String>,
}

impl OrderTerm {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: None,
        }
    }

    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub(crate) fn render(&self) -> String {
        match &self.direction {
            Some(d) => format!("{} {d}", self.field),
            None => self.field.clone(),
        }
    }
}

pub fn order(field: impl Into<String>) -> OrderTerm {
    OrderTerm::new(field)
}

pub fn asc(field: impl Into<String>) -> OrderTerm {
    OrderTerm::new(field).direction("asc")
}

pub fn desc(field: impl Into<String>) -> OrderTerm {
    OrderTerm::new(field).direction("desc")
}

impl From<&str> for OrderTerm {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for OrderTerm {
    fn from(v: String) -> Self {
        Self::new(v)
    }
}
