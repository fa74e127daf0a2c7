//! Dynamic SQL assembly shared by the resource repositories.
//!
//! [`FilterQuery`] turns an optional-field search object into a `SELECT` whose
//! `WHERE` clause holds one predicate per supplied filter, AND-ed in the order
//! the predicates are added. [`UpdateQuery`] does the same for the `SET` list of
//! a partial update. Both keep the placeholder numbers (`$1`, `$2`, ...) and
//! the bound values in lockstep through [`SqlArgs`].

use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, Pool, Postgres,
};

use crate::error::{AppError, AppResult};

/// A value bound to a positional placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    Text(String),
    Bool(bool),
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        SqlValue::Text(v.clone())
    }
}

/// Ordered list of bound values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlArgs {
    values: Vec<SqlValue>,
}

impl SqlArgs {
    /// Append a value and return its placeholder
    pub fn push(&mut self, value: impl Into<SqlValue>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bind every value, in placeholder order
    pub fn bind_to<'q, O>(
        self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for value in self.values {
            query = match value {
                SqlValue::Int(v) => query.bind(v),
                SqlValue::Text(v) => query.bind(v),
                SqlValue::Bool(v) => query.bind(v),
            };
        }
        query
    }
}

/// Escape LIKE metacharacters so user input only ever matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Fail with a bad request when both bounds are given and `min > max`
pub fn check_range(name: &str, min: Option<i32>, max: Option<i32>) -> AppResult<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(AppError::BadRequest(format!(
            "min{} cannot be greater than max{} ({} > {})",
            name, name, min, max
        ))),
        _ => Ok(()),
    }
}

/// `SELECT` with a conditionally assembled `WHERE` clause and a fixed ordering
#[derive(Debug, Clone)]
pub struct FilterQuery {
    select: &'static str,
    conditions: Vec<String>,
    args: SqlArgs,
    order_by: &'static str,
}

impl FilterQuery {
    /// `select` is everything up to (not including) `WHERE`
    pub fn new(select: &'static str, order_by: &'static str) -> Self {
        Self {
            select,
            conditions: Vec::new(),
            args: SqlArgs::default(),
            order_by,
        }
    }

    /// Case-insensitive substring match
    pub fn contains(mut self, column: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            let p = self.args.push(format!("%{}%", escape_like(value)));
            self.conditions.push(format!("{} ILIKE {}", column, p));
        }
        self
    }

    /// Strict equality
    pub fn equals<V: Into<SqlValue>>(mut self, column: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let p = self.args.push(value);
            self.conditions.push(format!("{} = {}", column, p));
        }
        self
    }

    /// Inclusive lower bound
    pub fn at_least(mut self, column: &str, value: Option<i32>) -> Self {
        if let Some(value) = value {
            let p = self.args.push(value);
            self.conditions.push(format!("{} >= {}", column, p));
        }
        self
    }

    /// Inclusive upper bound
    pub fn at_most(mut self, column: &str, value: Option<i32>) -> Self {
        if let Some(value) = value {
            let p = self.args.push(value);
            self.conditions.push(format!("{} <= {}", column, p));
        }
        self
    }

    pub fn sql(&self) -> String {
        let mut sql = self.select.trim_end().to_string();
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(self.order_by);
        sql
    }

    pub fn args(&self) -> &SqlArgs {
        &self.args
    }

    pub async fn fetch_all<T>(self, pool: &Pool<Postgres>) -> AppResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = self.sql();
        tracing::debug!(sql = %sql, params = self.args.len(), "filter query");
        let rows = self
            .args
            .bind_to(sqlx::query_as::<_, T>(&sql))
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }
}

/// `UPDATE ... SET` over the supplied subset of columns of a single row
#[derive(Debug, Clone)]
pub struct UpdateQuery {
    table: &'static str,
    sets: Vec<String>,
    args: SqlArgs,
}

impl UpdateQuery {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            sets: Vec::new(),
            args: SqlArgs::default(),
        }
    }

    pub fn set<V: Into<SqlValue>>(mut self, column: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let p = self.args.push(value);
            self.sets.push(format!("{} = {}", column, p));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Finish the statement with the row key; the key is bound last
    pub fn sql(&mut self, key_column: &str, key: impl Into<SqlValue>, returning: &str) -> String {
        let p = self.args.push(key);
        format!(
            "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
            self.table,
            self.sets.join(", "),
            key_column,
            p,
            returning
        )
    }

    /// Run the update and return the updated row, or `None` when the key matched nothing
    pub async fn fetch_optional<T>(
        mut self,
        pool: &Pool<Postgres>,
        key_column: &str,
        key: impl Into<SqlValue>,
        returning: &str,
    ) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        if self.is_empty() {
            return Err(sqlx::Error::Protocol("UPDATE with no columns".to_string()));
        }
        let sql = self.sql(key_column, key, returning);
        self.args
            .bind_to(sqlx::query_as::<_, T>(&sql))
            .fetch_optional(pool)
            .await
    }
}
