//! RecordQuery：由记录描述生成常用语句的 `Query` 包装，并把结果行映射回记录。

use crate::column::OrderTerm;
use crate::criteria::Criteria;
use crate::executor::{Executor, FetchError, Row};
use crate::macros::IntoStrings;
use crate::query::{Cte, Query, QueryResult};
use crate::record::{Record, RecordError, RecordResult};
use crate::value::SqlValue;
use std::fmt;
use std::marker::PhantomData;

pub struct RecordQuery<T> {
    query: Query,
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for RecordQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordQuery")
            .field("query", &self.query)
            .finish()
    }
}

impl<T> Clone for RecordQuery<T> {
    fn clone(&self) -> Self {
        Self::wrap(self.query.clone())
    }
}

impl<T> RecordQuery<T> {
    fn wrap(query: Query) -> Self {
        Self {
            query,
            _marker: PhantomData,
        }
    }

    pub fn sql(&self) -> &str {
        self.query.sql()
    }

    pub fn args(&self) -> &crate::args::Args {
        self.query.args()
    }

    pub fn build(&self) -> (String, Vec<SqlValue>) {
        self.query.build()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn into_query(self) -> Query {
        self.query
    }

    pub fn append(&mut self, fragment: &str) -> &mut Self {
        self.query.append(fragment);
        self
    }

    pub fn append_tight(&mut self, fragment: &str) -> &mut Self {
        self.query.append_tight(fragment);
        self
    }

    pub fn append_param(&mut self, value: impl Into<SqlValue>) -> &mut Self {
        self.query.append_param(value);
        self
    }

    pub fn where_(&mut self, criteria: impl Into<Criteria>) -> QueryResult<&mut Self> {
        self.query.where_(criteria)?;
        Ok(self)
    }

    pub fn and_where(&mut self, criteria: impl Into<Criteria>) -> QueryResult<&mut Self> {
        self.query.and_where(criteria)?;
        Ok(self)
    }

    pub fn where_not(&mut self, criteria: impl Into<Criteria>) -> QueryResult<&mut Self> {
        self.query.where_not(criteria)?;
        Ok(self)
    }

    pub fn and_where_not(&mut self, criteria: impl Into<Criteria>) -> QueryResult<&mut Self> {
        self.query.and_where_not(criteria)?;
        Ok(self)
    }

    pub fn parens<F>(&mut self, f: F) -> QueryResult<&mut Self>
    where
        F: FnOnce(&mut Query) -> QueryResult<&mut Query>,
    {
        self.query.parens(f)?;
        Ok(self)
    }

    pub fn order_by<I, O>(&mut self, terms: I) -> &mut Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OrderTerm>,
    {
        self.query.order_by(terms);
        self
    }

    pub fn group_by<S: IntoStrings>(&mut self, fields: S) -> &mut Self {
        self.query.group_by(fields);
        self
    }

    pub fn inner_join(&mut self, table: &str) -> &mut Self {
        self.query.inner_join(table);
        self
    }

    pub fn left_join(&mut self, table: &str) -> &mut Self {
        self.query.left_join(table);
        self
    }

    pub fn on(&mut self, condition: &str) -> &mut Self {
        self.query.on(condition);
        self
    }

    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.query.limit(limit);
        self
    }

    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.query.offset(offset);
        self
    }

    pub fn returning<S: IntoStrings>(&mut self, fields: S) -> &mut Self {
        self.query.returning(fields);
        self
    }

    pub fn append_with<'a>(
        &mut self,
        clauses: impl IntoIterator<Item = Cte<'a>>,
    ) -> QueryResult<&mut Self> {
        self.query.append_with(clauses)?;
        Ok(self)
    }

    /// 执行语句，返回原始结果行（用于 insert / update / delete）。
    pub fn run<E: Executor + ?Sized>(&self, executor: &mut E) -> Result<Vec<Row>, E::Error> {
        self.query.run(executor)
    }
}

impl<T: Record> RecordQuery<T> {
    /// `select t.c1, t.c2 as field2 from t`。
    pub fn select_all() -> RecordResult<Self> {
        let desc = T::descriptor().validate()?;
        let mut query = Query::select(desc.select_columns());
        query.from(desc.table);
        Ok(Self::wrap(query))
    }

    /// 按主键查找：`select_all()` 加 `where ( pk = ? )`。
    pub fn find(primary_key: impl Into<SqlValue>) -> RecordResult<Self> {
        let desc = T::descriptor();
        let mut q = Self::select_all()?;
        q.where_(Criteria::new().and(desc.primary_key_column(), primary_key))?;
        Ok(q)
    }

    /// 用已赋值字段生成 insert。
    pub fn insert(record: &T) -> RecordResult<Self> {
        let desc = T::descriptor().validate()?;
        Ok(Self::wrap(Query::insert_into(
            desc.table,
            record.writable_values()?,
        )))
    }

    /// 按主键更新其余已赋值字段。
    ///
    /// 主键未赋值时返回 [`RecordError::UnsetPrimaryKey`]，除主键外没有可写字段时返回
    /// [`RecordError::NothingToPatch`]。
    pub fn patch(record: &T) -> RecordResult<Self> {
        let desc = T::descriptor().validate()?;
        let primary_key = record.primary_key()?;
        let pk_column = desc.primary_key_column();

        let updates: Vec<(String, SqlValue)> = record
            .writable_values()?
            .into_iter()
            .filter(|(column, _)| *column != pk_column)
            .collect();
        if updates.is_empty() {
            return Err(RecordError::NothingToPatch {
                record: desc.record,
            });
        }

        let mut query = Query::update(desc.table);
        query
            .set(updates)
            .where_(Criteria::new().and(pk_column, primary_key))?;
        Ok(Self::wrap(query))
    }

    /// `delete from t`，条件由调用方追加。
    pub fn delete_from() -> RecordResult<Self> {
        let desc = T::descriptor().validate()?;
        Ok(Self::wrap(Query::delete_from(desc.table)))
    }

    /// 按主键删除。
    pub fn delete(record: &T) -> RecordResult<Self> {
        let primary_key = record.primary_key()?;
        let mut q = Self::delete_from()?;
        q.where_(Criteria::new().and(T::descriptor().primary_key_column(), primary_key))?;
        Ok(q)
    }

    /// 主键未赋值时 insert，否则 patch。
    pub fn save(record: &T) -> RecordResult<Self> {
        match record.primary_key() {
            Ok(_) => Self::patch(record),
            Err(RecordError::UnsetPrimaryKey { .. }) => Self::insert(record),
            Err(e) => Err(e),
        }
    }

    /// 执行并把每一行映射为记录。
    pub fn fetch<E>(&self, executor: &mut E) -> Result<Vec<T>, FetchError<E::Error>>
    where
        E: Executor + ?Sized,
    {
        self.query.fetch_records(executor)
    }

    /// 执行并返回第一条记录。
    pub fn first<E>(&self, executor: &mut E) -> Result<Option<T>, FetchError<E::Error>>
    where
        E: Executor + ?Sized,
    {
        let rows = self.run(executor).map_err(FetchError::Execute)?;
        rows.first()
            .map(|row| T::from_row(row).map_err(FetchError::from))
            .transpose()
    }
}

impl<T> fmt::Display for RecordQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.query, f)
    }
}

/// 记录上的快捷方法：`vehicle.insert()`、`Vehicle::find(4)` 等。
pub trait RecordExt: Record + Sized {
    fn select_all() -> RecordResult<RecordQuery<Self>> {
        RecordQuery::select_all()
    }

    fn find(primary_key: impl Into<SqlValue>) -> RecordResult<RecordQuery<Self>> {
        RecordQuery::find(primary_key)
    }

    fn delete_from() -> RecordResult<RecordQuery<Self>> {
        RecordQuery::delete_from()
    }

    fn insert(&self) -> RecordResult<RecordQuery<Self>> {
        RecordQuery::insert(self)
    }

    fn patch(&self) -> RecordResult<RecordQuery<Self>> {
        RecordQuery::patch(self)
    }

    fn delete(&self) -> RecordResult<RecordQuery<Self>> {
        RecordQuery::delete(self)
    }

    fn save(&self) -> RecordResult<RecordQuery<Self>> {
        RecordQuery::save(self)
    }
}

impl<T: Record> RecordExt for T {}
