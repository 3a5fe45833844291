//! halo-query：逐段拼接的 SQL 语句 builder，附带一个轻量的记录映射层。
//!
//! - [`Query`]：在同一个缓冲区上追加 SQL 片段，并按 `?` 出现顺序收集参数；
//! - [`RecordQuery`]：由 [`record!`] 声明的表结构生成 select / insert / update / delete；
//! - [`Executor`]：外部驱动的接口，执行语句并返回 [`Row`]。

pub mod args;
pub mod column;
pub mod criteria;
#[cfg(test)]
mod criteria_tests;
pub mod executor;
pub mod field;
pub mod field_mapper;
pub mod macros;
#[cfg(test)]
mod macros_tests;
pub mod query;
pub mod record;
pub mod record_query;
mod string_builder;
#[cfg(test)]
mod testutil;
pub mod value;

pub use crate::args::{Args, Binding, ParamKind};
pub use crate::column::{OrderTerm, SelectColumn, asc, col, desc, order};
pub use crate::criteria::Criteria;
pub use crate::executor::{Executor, FetchError, Row, RowKey};
pub use crate::field::{Field, FieldError, FromSqlValue};
pub use crate::field_mapper::{
    FieldMapperFunc, default_field_mapper, identity_mapper, prefix_mapper,
    set_default_field_mapper, set_default_field_mapper_scoped, snake_case_mapper, suffix_mapper,
    upper_case_mapper,
};
pub use crate::macros::IntoStrings;
pub use crate::query::{Cte, Query, QueryError, QueryResult, cte};
pub use crate::record::{ColumnMeta, Record, RecordDescriptor, RecordError, RecordResult};
pub use crate::record_query::{RecordExt, RecordQuery};
pub use crate::value::{Literal, SqlValue, list, literal};
