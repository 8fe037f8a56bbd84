//! DELETE statement builder.

use sea_query::{Condition, IntoCondition, PostgresQueryBuilder, Query, Values};

use super::expected_rows::ExpectedRows;
use crate::executor::{RowError, RowExecutor};
use crate::row::Name;

/// A DELETE from one table.
#[derive(Debug, Clone)]
pub struct SqlDelete {
    table: &'static str,
    condition: Condition,
}

impl SqlDelete {
    pub fn from_table(table: &'static str) -> Self {
        Self {
            table,
            condition: Condition::all(),
        }
    }

    /// Add a WHERE condition; repeated calls are AND-ed.
    pub fn filter<C: IntoCondition>(mut self, condition: C) -> Self {
        self.condition = self.condition.add(condition.into_condition());
        self
    }

    pub fn build(&self) -> (String, Values) {
        let mut statement = Query::delete();
        statement
            .from_table(Name(self.table))
            .cond_where(self.condition.clone());
        statement.build(PostgresQueryBuilder)
    }

    /// Execute and check the affected-row count against `expected`.
    pub fn execute<E: RowExecutor + ?Sized>(
        &self,
        executor: &E,
        expected: ExpectedRows,
    ) -> Result<u64, RowError> {
        let (sql, values) = self.build();
        let affected = executor.execute(&sql, &values)?;
        expected.check(affected)?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::tests::CustomerRow;
    use crate::test_helpers::MockExecutor;

    #[test]
    fn test_delete_renders_where() {
        let (sql, values) = SqlDelete::from_table("Customers")
            .filter(CustomerRow::ID.eq(7i64))
            .build();
        assert_eq!(sql, r#"DELETE FROM "Customers" WHERE "Customers"."Id" = $1"#);
        assert_eq!(values.0.len(), 1);
    }

    #[test]
    fn test_delete_returns_affected() {
        let executor = MockExecutor::new();
        executor.push_affected(3);
        let n = SqlDelete::from_table("Customers")
            .filter(CustomerRow::CITY.eq("Oslo"))
            .execute(&executor, ExpectedRows::Ignore)
            .unwrap();
        assert_eq!(n, 3);
    }
}
