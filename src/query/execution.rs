//! Query execution methods for `SqlQuery`.
//!
//! Row-returning methods require a [`Selected`] query. `count`, `exists`
//! and `scalar` replace the projection themselves and work in either state.

use sea_query::{Asterisk, Expr, Func};

use crate::executor::{RowError, RowExecutor};
use crate::query::select::{Selected, SqlQuery};
use crate::row::{materialize, Row};
use crate::value::{coerce, ValueType};

impl<R: Row> SqlQuery<R, Selected> {
    /// Execute expecting at most one row.
    ///
    /// The statement is limited to two rows; a second row is reported as
    /// [`RowError::TooManyRecords`] instead of being silently dropped.
    pub fn get_single<E: RowExecutor + ?Sized>(self, executor: &E) -> Result<Option<R>, RowError> {
        let mode = self.mode();
        let (sql, values) = self.limit(2).build();
        let mut rows = executor.query_all(&sql, &values)?;
        match rows.len() {
            0 => Ok(None),
            1 => rows.pop().map(|row| materialize(&row, mode)).transpose(),
            _ => Err(RowError::TooManyRecords {
                table: R::table_name(),
            }),
        }
    }

    /// Execute and return the first row, if any. Ordering is up to the
    /// caller.
    pub fn get_first<E: RowExecutor + ?Sized>(self, executor: &E) -> Result<Option<R>, RowError> {
        let mode = self.mode();
        let (sql, values) = self.limit(1).build();
        executor
            .query_one(&sql, &values)?
            .map(|row| materialize(&row, mode))
            .transpose()
    }

    /// Execute and return every row in result-set order.
    pub fn list<E: RowExecutor + ?Sized>(self, executor: &E) -> Result<Vec<R>, RowError> {
        let mode = self.mode();
        let (sql, values) = self.build();
        executor
            .query_all(&sql, &values)?
            .iter()
            .map(|row| materialize(row, mode))
            .collect()
    }
}

impl<R: Row, S> SqlQuery<R, S> {
    /// `SELECT COUNT(*)` over the current filters.
    pub fn count<E: RowExecutor + ?Sized>(mut self, executor: &E) -> Result<u64, RowError> {
        self.statement.clear_selects();
        self.statement.clear_order_by();
        let count: Option<i64> = self
            .select_raw(Func::count(Expr::col(Asterisk)).into())
            .scalar(executor)?;
        let count = count.unwrap_or(0);
        u64::try_from(count).map_err(|_| RowError::ParseError(format!("negative count {count}")))
    }

    /// `SELECT 1 ... LIMIT 1` over the current filters.
    pub fn exists<E: RowExecutor + ?Sized>(mut self, executor: &E) -> Result<bool, RowError> {
        self.statement.clear_selects();
        self.statement.clear_order_by();
        let (sql, values) = self.select_raw(Expr::cust("1")).limit(1).build();
        Ok(executor.query_one(&sql, &values)?.is_some())
    }

    /// First column of the first row, converted to `T`.
    ///
    /// `None` when there is no row or the value is null.
    pub fn scalar<T, E>(self, executor: &E) -> Result<Option<T>, RowError>
    where
        T: ValueType,
        E: RowExecutor + ?Sized,
    {
        let (sql, values) = self.build();
        let Some(row) = executor.query_one(&sql, &values)? else {
            return Ok(None);
        };
        let Some(value) = row.into_values().into_iter().next() else {
            return Err(RowError::ParseError("scalar query returned no columns".to_string()));
        };
        let value = coerce(value, &T::null_value()).map_err(|e| RowError::ParseError(e.to_string()))?;
        Ok(T::from_value(value))
    }
}
