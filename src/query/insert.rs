//! INSERT statement builder.

use sea_query::{Expr, InsertStatement, PostgresQueryBuilder, Query, Value, Values};

use crate::executor::{RowError, RowExecutor};
use crate::row::{FieldDef, Name};
use crate::value::RowId;

/// An INSERT into one table, optionally returning the identity column.
#[derive(Debug, Clone)]
pub struct SqlInsert {
    table: &'static str,
    columns: Vec<&'static str>,
    values: Vec<Value>,
    identity: Option<&'static str>,
}

impl SqlInsert {
    pub fn into_table(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
            values: Vec::new(),
            identity: None,
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Add a column value.
    pub fn set(mut self, field: &FieldDef, value: Value) -> Self {
        self.columns.push(field.column());
        self.values.push(value);
        self
    }

    /// Columns in insertion order.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Mark `field` as the column to read back with `RETURNING`.
    pub fn identity_column(mut self, field: &FieldDef) -> Self {
        self.identity = Some(field.column());
        self
    }

    pub fn identity(&self) -> Option<&'static str> {
        self.identity
    }

    fn statement(&self, returning: bool) -> Result<InsertStatement, RowError> {
        let mut statement = Query::insert();
        statement.into_table(Name(self.table));
        if self.columns.is_empty() {
            statement.or_default_values();
        } else {
            statement.columns(self.columns.iter().copied().map(Name));
            statement
                .values(self.values.iter().cloned().map(Expr::val))
                .map_err(|e| RowError::QueryError(format!("INSERT into '{}': {e}", self.table)))?;
        }
        if returning {
            if let Some(identity) = self.identity {
                statement.returning_col(Name(identity));
            }
        }
        Ok(statement)
    }

    /// Render with `$n` placeholders, without `RETURNING`.
    pub fn build(&self) -> Result<(String, Values), RowError> {
        Ok(self.statement(false)?.build(PostgresQueryBuilder))
    }

    /// Execute and return the affected-row count.
    pub fn execute<E: RowExecutor + ?Sized>(&self, executor: &E) -> Result<u64, RowError> {
        let (sql, values) = self.build()?;
        executor.execute(&sql, &values)
    }

    /// Execute with `RETURNING <identity>` and read the new identifier back.
    ///
    /// `None` when no identity column is marked or the store returned no row.
    pub fn execute_and_get_id<I, E>(&self, executor: &E) -> Result<Option<I>, RowError>
    where
        I: RowId,
        E: RowExecutor + ?Sized,
    {
        if self.identity.is_none() {
            self.execute(executor)?;
            return Ok(None);
        }
        let (sql, values) = self.statement(true)?.build(PostgresQueryBuilder);
        let Some(row) = executor.query_one(&sql, &values)? else {
            return Ok(None);
        };
        Ok(row.into_values().into_iter().next().and_then(I::from_db_value))
    }
}
