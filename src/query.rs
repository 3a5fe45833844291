//! Query：逐段拼接 SQL 文本，同时按 `?` 出现顺序收集参数。
//!
//! 所有拼接方法都在原对象上修改并返回 `&mut Self`；`parens` / `cte` 的回调拿到的
//! 也是同一个 `Query`，不会产生子缓冲区。

use crate::args::{Args, Binding};
use crate::column::{OrderTerm, SelectColumn};
use crate::criteria::Criteria;
use crate::macros::{IntoStrings, collect_into_strings};
use crate::string_builder::StringBuilder;
use crate::value::{Literal, SqlValue};
use std::fmt;

/// 构建语句时的错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// 对 NULL 只能使用 `=`、`!=`、`<>`。
    #[error("invalid comparison with NULL: `{field} {comparator} NULL`")]
    InvalidNullComparison { field: String, comparator: String },
}

pub type QueryResult<T> = Result<T, QueryError>;

type BuildFn<'a> = Box<dyn FnOnce(&mut Query) -> QueryResult<()> + 'a>;

/// WITH 子句中的一项：`label as ( ... )`。
pub struct Cte<'a> {
    label: String,
    build: BuildFn<'a>,
}

impl fmt::Debug for Cte<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cte")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// cte：声明一个 WITH 子查询，回调在同一个 `Query` 上继续拼接。
pub fn cte<'a, F>(label: impl Into<String>, f: F) -> Cte<'a>
where
    F: FnOnce(&mut Query) -> QueryResult<&mut Query> + 'a,
{
    Cte {
        label: label.into(),
        build: Box::new(move |q: &mut Query| f(q).map(|_| ())),
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    sql: StringBuilder,
    args: Args,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// `select ...` 开头的新语句。
    pub fn select<I, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<SelectColumn>,
    {
        let mut q = Self::new();
        q.append_select(columns);
        q
    }

    /// `update <table>` 开头的新语句。
    pub fn update(table: &str) -> Self {
        let mut q = Self::new();
        q.append_update(table);
        q
    }

    /// `insert into <table> (...) values (...)` 的新语句。
    pub fn insert_into<I, K, V>(table: &str, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        let mut q = Self::new();
        q.append_insert_into(table, values);
        q
    }

    /// `delete from <table>` 开头的新语句。
    pub fn delete_from(table: &str) -> Self {
        let mut q = Self::new();
        q.append_delete_from(table);
        q
    }

    /// `with ...` 开头的新语句。
    pub fn with<'a>(clauses: impl IntoIterator<Item = Cte<'a>>) -> QueryResult<Self> {
        let mut q = Self::new();
        q.append_with(clauses)?;
        Ok(q)
    }

    /// 构造一个原样拼入的 SQL 片段。
    pub fn literal(fragment: impl Into<String>) -> SqlValue {
        SqlValue::Literal(Literal::new(fragment))
    }

    pub fn sql(&self) -> &str {
        self.sql.as_str()
    }

    pub fn args(&self) -> &Args {
        &self.args
    }

    pub fn bindings(&self) -> Vec<Binding<'_>> {
        self.args.bindings()
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty() && self.args.is_empty()
    }

    /// 返回当前 SQL 与参数的拷贝。
    pub fn build(&self) -> (String, Vec<SqlValue>) {
        (self.sql.as_str().to_string(), self.args.values().to_vec())
    }

    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql.into_string(), self.args.into_values())
    }

    /// 清空文本与参数，以便复用同一个 builder。
    pub fn reset(&mut self) -> &mut Self {
        self.sql.reset();
        self.args.reset();
        self
    }

    /// 追加片段；缓冲区非空时先补一个空格。
    pub fn append(&mut self, fragment: &str) -> &mut Self {
        self.sql.write_leading(fragment);
        self
    }

    /// 紧贴追加，不加分隔符（用于 `,`、`)` 之类的标点）。
    pub fn append_tight(&mut self, fragment: &str) -> &mut Self {
        self.sql.write_str(fragment);
        self
    }

    /// 追加一个值：
    ///
    /// - `Literal`：原样追加，不绑定参数；
    /// - `List`：展开为 `( ?, ?, ... )`，逐项递归；
    /// - 其他：追加 `?` 并绑定该值。
    pub fn append_param(&mut self, value: impl Into<SqlValue>) -> &mut Self {
        match value.into() {
            SqlValue::Literal(lit) => self.append(lit.as_str()),
            SqlValue::List(items) => {
                self.append("(");
                for (i, item) in items.into_iter().enumerate() {
                    if i != 0 {
                        self.append_tight(",");
                    }
                    self.append_param(item);
                }
                self.append(")")
            }
            v @ (SqlValue::Null
            | SqlValue::Bool(_)
            | SqlValue::I64(_)
            | SqlValue::F64(_)
            | SqlValue::String(_)) => {
                let ph = self.args.add(v);
                self.append(ph)
            }
        }
    }

    pub fn append_select<I, C>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<SelectColumn>,
    {
        self.append("select");
        for (i, column) in columns.into_iter().enumerate() {
            let column = column.into();
            if i != 0 {
                self.append_tight(",");
            }
            self.append(&column.expr);
            if let Some(alias) = &column.alias {
                self.append("as").append(alias);
            }
        }
        self
    }

    pub fn from(&mut self, table: &str) -> &mut Self {
        self.append(&format!("from {table}"))
    }

    pub fn inner_join(&mut self, table: &str) -> &mut Self {
        self.append(&format!("inner join {table}"))
    }

    pub fn left_join(&mut self, table: &str) -> &mut Self {
        self.append(&format!("left join {table}"))
    }

    pub fn on(&mut self, condition: &str) -> &mut Self {
        self.append(&format!("on ({condition})"))
    }

    pub fn group_by<T: IntoStrings>(&mut self, fields: T) -> &mut Self {
        let fields = collect_into_strings(fields);
        self.append("group by").append(&fields.join(", "))
    }

    /// `where ( ... )`。
    pub fn where_(&mut self, criteria: impl Into<Criteria>) -> QueryResult<&mut Self> {
        self.criteria_group("where", criteria.into())
    }

    /// `and ( ... )`。
    pub fn and_where(&mut self, criteria: impl Into<Criteria>) -> QueryResult<&mut Self> {
        self.criteria_group("and", criteria.into())
    }

    /// `where not ( ... )`，比较符固定为 `=`，连接符固定为 `and`。
    pub fn where_not(&mut self, criteria: impl Into<Criteria>) -> QueryResult<&mut Self> {
        self.criteria_group("where not", criteria.into().with_defaults())
    }

    /// `and not ( ... )`，比较符固定为 `=`，连接符固定为 `and`。
    pub fn and_where_not(&mut self, criteria: impl Into<Criteria>) -> QueryResult<&mut Self> {
        self.criteria_group("and not", criteria.into().with_defaults())
    }

    fn criteria_group(&mut self, keyword: &str, criteria: Criteria) -> QueryResult<&mut Self> {
        self.append(keyword);
        self.parens(|q| q.append_criteria(&criteria))
    }

    /// 不带括号地输出一组条件，条件之间插入连接符。
    ///
    /// 值为 NULL 时：`=` 输出 `field is null`，`!=` / `<>` 输出 `field is not null`，
    /// 其他比较符返回 [`QueryError::InvalidNullComparison`]，该条件及其后的内容都不会写入。
    pub fn append_criteria(&mut self, criteria: &Criteria) -> QueryResult<&mut Self> {
        let comparator = criteria.comparator();
        for (i, (field, value)) in criteria.iter().enumerate() {
            let null_test = if value.is_null() {
                match comparator {
                    "=" => Some("is null"),
                    "!=" | "<>" => Some("is not null"),
                    _ => {
                        return Err(QueryError::InvalidNullComparison {
                            field: field.to_string(),
                            comparator: comparator.to_string(),
                        });
                    }
                }
            } else {
                None
            };

            if i != 0 {
                self.append(criteria.joiner());
            }
            self.append(field);
            match null_test {
                Some(test) => {
                    self.append(test);
                }
                None => {
                    self.append(comparator).append_param(value.clone());
                }
            }
        }
        Ok(self)
    }

    pub fn order_by<I, T>(&mut self, terms: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OrderTerm>,
    {
        self.append("order by");
        for (i, term) in terms.into_iter().enumerate() {
            if i != 0 {
                self.append_tight(",");
            }
            self.append(&term.into().render());
        }
        self
    }

    /// 输出 `(`，用同一个 `Query` 调用 `f`，再输出 `)`。
    pub fn parens<F>(&mut self, f: F) -> QueryResult<&mut Self>
    where
        F: FnOnce(&mut Query) -> QueryResult<&mut Query>,
    {
        self.append("(");
        f(&mut *self)?;
        Ok(self.append(")"))
    }

    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.append("limit").append_param(limit)
    }

    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.append("offset").append_param(offset)
    }

    pub fn append_update(&mut self, table: &str) -> &mut Self {
        self.append(&format!("update {table}"))
    }

    /// `set f1 = ?, f2 = ?`，字面量原样输出。
    pub fn set<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        self.append("set");
        for (i, (field, value)) in values.into_iter().enumerate() {
            if i != 0 {
                self.append_tight(",");
            }
            self.append(&field.into()).append("=").append_param(value);
        }
        self
    }

    /// `insert into t (f1, f2) values (?, NOW())`：字面量就地输出，其余按输入顺序绑定。
    pub fn append_insert_into<I, K, V>(&mut self, table: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SqlValue>,
    {
        self.append(&format!("insert into {table} ("));
        let mut placeholders: Vec<String> = Vec::new();
        for (column, value) in values {
            if !placeholders.is_empty() {
                self.append_tight(", ");
            }
            self.append_tight(&column.into());
            let ph = self.placeholder_for(value.into());
            placeholders.push(ph);
        }
        self.append_tight(") values (")
            .append_tight(&placeholders.join(", "))
            .append_tight(")")
    }

    /// 为 values 列表生成一个占位文本，列表展开为 `(?, ?)`。
    fn placeholder_for(&mut self, value: SqlValue) -> String {
        match value {
            SqlValue::Literal(lit) => lit.fragment,
            SqlValue::List(items) => {
                let inner: Vec<String> = items
                    .into_iter()
                    .map(|item| self.placeholder_for(item))
                    .collect();
                format!("({})", inner.join(", "))
            }
            v @ (SqlValue::Null
            | SqlValue::Bool(_)
            | SqlValue::I64(_)
            | SqlValue::F64(_)
            | SqlValue::String(_)) => self.args.add(v).to_string(),
        }
    }

    pub fn append_delete_from(&mut self, table: &str) -> &mut Self {
        self.append(&format!("delete from {table}"))
    }

    /// `returning f1, f2`（是否支持由目标数据库决定）。
    pub fn returning<T: IntoStrings>(&mut self, fields: T) -> &mut Self {
        let fields = collect_into_strings(fields);
        self.append("returning").append(&fields.join(", "))
    }

    /// `with l1 as ( ... ), l2 as ( ... )`。
    pub fn append_with<'a>(
        &mut self,
        clauses: impl IntoIterator<Item = Cte<'a>>,
    ) -> QueryResult<&mut Self> {
        self.append("with");
        for (i, Cte { label, build }) in clauses.into_iter().enumerate() {
            if i != 0 {
                self.append_tight(",");
            }
            self.append(&label).append("as");
            self.parens(move |q| {
                build(&mut *q)?;
                Ok(q)
            })?;
        }
        Ok(self)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql.as_str())
    }
}
