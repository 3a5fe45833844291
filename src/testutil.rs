//! 测试夹具：按顺序返回预置结果的执行器，以及 `Vehicle` 记录。

use crate::args::{Binding, ParamKind};
use crate::executor::{Executor, Row};
use crate::field::Field;
use crate::value::SqlValue;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub sql: String,
    pub params: Vec<(usize, SqlValue, ParamKind)>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("driver error: {0}")]
pub(crate) struct DriverError(pub String);

/// 记录每次调用；结果按 `returning` 的顺序逐次返回，用完后返回空结果。
#[derive(Debug, Default)]
pub(crate) struct ScriptedExecutor {
    pub calls: Vec<Call>,
    results: VecDeque<Vec<Row>>,
    failure: Option<String>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(mut self, rows: Vec<Row>) -> Self {
        self.results.push_back(rows);
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }
}

impl Executor for ScriptedExecutor {
    type Error = DriverError;

    fn query(&mut self, sql: &str, bindings: &[Binding<'_>]) -> Result<Vec<Row>, DriverError> {
        if let Some(message) = &self.failure {
            return Err(DriverError(message.clone()));
        }
        self.calls.push(Call {
            sql: sql.to_string(),
            params: bindings
                .iter()
                .map(|b| (b.position, b.value.clone(), b.kind))
                .collect(),
        });
        Ok(self.results.pop_front().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Vehicle {
    pub id: Field<i64>,
    pub kind: Field<String>,
    pub make: Field<String>,
    pub model: Field<String>,
    pub year: Field<i64>,
    pub description: Field<String>,
}

crate::record! {
    impl Vehicle {
        table: "vehicles",
        primary_key: id,
        columns: {
            id: "id",
            kind: "kind",
            make: "make",
            model: "model",
            year: "year",
            description: "brief_description",
        }
    }
}

impl Vehicle {
    pub fn new(kind: &str, make: &str, model: &str, year: i64, description: Option<&str>) -> Self {
        Self {
            id: Field::Unset,
            kind: kind.to_string().into(),
            make: make.to_string().into(),
            model: model.to_string().into(),
            year: year.into(),
            description: Field::from_option(description.map(str::to_string)),
        }
    }
}
