//! UPDATE statement builder.

use sea_query::{Condition, IntoCondition, PostgresQueryBuilder, Query, Value, Values};

use super::expected_rows::ExpectedRows;
use crate::executor::{RowError, RowExecutor};
use crate::row::{FieldDef, Name};

/// An UPDATE of one table.
#[derive(Debug, Clone)]
pub struct SqlUpdate {
    table: &'static str,
    sets: Vec<(&'static str, Value)>,
    condition: Condition,
}

impl SqlUpdate {
    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            sets: Vec::new(),
            condition: Condition::all(),
        }
    }

    /// Add a `SET column = value` pair.
    pub fn set(mut self, field: &FieldDef, value: Value) -> Self {
        self.sets.push((field.column(), value));
        self
    }

    /// Columns in SET order.
    pub fn columns(&self) -> Vec<&'static str> {
        self.sets.iter().map(|(c, _)| *c).collect()
    }

    /// Add a WHERE condition; repeated calls are AND-ed.
    pub fn filter<C: IntoCondition>(mut self, condition: C) -> Self {
        self.condition = self.condition.add(condition.into_condition());
        self
    }

    /// Render with `$n` placeholders.
    ///
    /// # Errors
    ///
    /// `RowError::QueryError` when there is nothing to SET.
    pub fn build(&self) -> Result<(String, Values), RowError> {
        if self.sets.is_empty() {
            return Err(RowError::QueryError(format!(
                "UPDATE of '{}' has no columns to set",
                self.table
            )));
        }
        let mut statement = Query::update();
        statement.table(Name(self.table));
        for (column, value) in &self.sets {
            statement.value(Name(*column), value.clone());
        }
        statement.cond_where(self.condition.clone());
        Ok(statement.build(PostgresQueryBuilder))
    }

    /// Execute and check the affected-row count against `expected`.
    pub fn execute<E: RowExecutor + ?Sized>(
        &self,
        executor: &E,
        expected: ExpectedRows,
    ) -> Result<u64, RowError> {
        let (sql, values) = self.build()?;
        let affected = executor.execute(&sql, &values)?;
        expected.check(affected)?;
        Ok(affected)
    }
}
