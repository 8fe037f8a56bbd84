//! Select query builder bound to a row type.
//!
//! `SqlQuery` wraps a `sea_query::SelectStatement` whose `FROM` clause is the
//! row's table. Building methods live here; execution methods are in the
//! execution module.
//!
//! The second type parameter tracks whether any column has been selected.
//! A query starts out [`Pending`]; every `select*` method yields a
//! [`Selected`] query, and only selected queries can be executed for rows.

use sea_query::{
    Expr, IntoCondition, JoinType, Order, PostgresQueryBuilder, Query,
    SelectStatement, Values,
};
use std::fmt;
use std::marker::PhantomData;

use crate::row::{FieldDef, Name, Row, TrackingMode};

/// No column selected yet.
#[derive(Debug, Clone, Copy)]
pub struct Pending;

/// At least one column selected; the query can be executed.
#[derive(Debug, Clone, Copy)]
pub struct Selected;

/// Query builder for selecting rows of type `R`
///
/// # Example
///
/// ```no_run
/// use rowguard::{Row, SqlQuery, TrackingMode};
/// use sea_query::Order;
///
/// # fn demo<R: Row>(name: &'static rowguard::FieldDef, executor: &impl rowguard::RowExecutor) -> Result<(), rowguard::RowError> {
/// let rows: Vec<R> = SqlQuery::<R, _>::from_row(&R::with_mode(TrackingMode::WithChecks))
///     .select_table_fields()
///     .filter(name.like("Ac%"))
///     .order_by(name, Order::Asc)
///     .limit(10)
///     .list(executor)?;
/// # Ok(())
/// # }
/// ```
pub struct SqlQuery<R: Row, S = Selected> {
    pub(crate) statement: SelectStatement,
    mode: TrackingMode,
    _marker: PhantomData<fn() -> (R, S)>,
}

impl<R: Row> SqlQuery<R, Pending> {
    /// Start a query bound to `row`'s table; results are materialized in
    /// `row`'s tracking mode.
    pub fn from_row(row: &R) -> Self {
        let mut statement = Query::select();
        statement.from(Name(R::table_name()));
        Self {
            statement,
            mode: row.mode(),
            _marker: PhantomData,
        }
    }
}

impl<R: Row, S> SqlQuery<R, S> {
    fn into_state<T>(self) -> SqlQuery<R, T> {
        SqlQuery {
            statement: self.statement,
            mode: self.mode,
            _marker: PhantomData,
        }
    }

    /// Tracking mode of the rows this query materializes.
    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    /// Select every table-mapped field of `R`, in declaration order.
    pub fn select_table_fields(mut self) -> SqlQuery<R, Selected> {
        for field in R::fields().iter().filter(|f| f.is_table_field()) {
            self.statement.column((Name(field.table()), Name(field.column())));
        }
        self.into_state()
    }

    /// Select one field. Expression fields are selected as their SQL,
    /// aliased to the field's column name so materialization finds them.
    pub fn select(mut self, field: &FieldDef) -> SqlQuery<R, Selected> {
        match field.sql_expression() {
            Some(sql) => {
                self.statement.expr_as(Expr::cust(sql), Name(field.column()));
            }
            None => {
                self.statement.column((Name(field.table()), Name(field.column())));
            }
        }
        self.into_state()
    }

    /// Select several fields.
    pub fn select_fields<'a, I>(mut self, fields: I) -> SqlQuery<R, Selected>
    where
        I: IntoIterator<Item = &'a FieldDef>,
    {
        for field in fields {
            self = self.select(field).into_state();
        }
        self.into_state()
    }

    /// Select an arbitrary expression into `field`, e.g. a joined column.
    pub fn select_expr(mut self, expr: Expr, field: &FieldDef) -> SqlQuery<R, Selected> {
        self.statement.expr_as(expr, Name(field.column()));
        self.into_state()
    }

    /// Select an expression that maps to no field (for `scalar`).
    pub fn select_raw(mut self, expr: Expr) -> SqlQuery<R, Selected> {
        self.statement.expr(expr);
        self.into_state()
    }

    /// Add a filter condition
    ///
    /// Accepts anything that implements `IntoCondition`: `FieldDef`
    /// comparisons, raw `Expr`s, or `Condition::all()` / `Condition::any()`
    /// trees. Repeated calls are AND-ed.
    pub fn filter<F>(mut self, condition: F) -> Self
    where
        F: IntoCondition,
    {
        self.statement.cond_where(condition.into_condition());
        self
    }

    /// Add an ORDER BY clause on a field
    pub fn order_by(mut self, field: &FieldDef, order: Order) -> Self {
        self.statement.order_by_expr(field.col(), order);
        self
    }

    /// Add an ORDER BY clause on an arbitrary expression
    pub fn order_by_expr(mut self, expr: Expr, order: Order) -> Self {
        self.statement.order_by_expr(expr, order);
        self
    }

    /// Add a LIMIT clause
    pub fn limit(mut self, limit: u64) -> Self {
        self.statement.limit(limit);
        self
    }

    /// Add an OFFSET clause
    pub fn offset(mut self, offset: u64) -> Self {
        self.statement.offset(offset);
        self
    }

    /// Add an INNER JOIN clause
    pub fn join<C: IntoCondition>(self, table: &'static str, on: C) -> Self {
        self.join_as(JoinType::InnerJoin, table, table, on)
    }

    /// Add a LEFT JOIN clause
    pub fn left_join<C: IntoCondition>(self, table: &'static str, on: C) -> Self {
        self.join_as(JoinType::LeftJoin, table, table, on)
    }

    /// Join `table` under `alias`.
    ///
    /// ```rust
    /// # use rowguard::{FieldDef, Row, SqlQuery, TrackingMode};
    /// # use sea_query::{Expr, ExprTrait, JoinType};
    /// # fn demo<R: Row>(country_id: &FieldDef) -> SqlQuery<R, rowguard::query::Pending> {
    /// SqlQuery::from_row(&R::with_mode(TrackingMode::WithChecks)).join_as(
    ///     JoinType::LeftJoin,
    ///     "Countries",
    ///     "c",
    ///     Expr::col(("c", "Id")).equals(("Customers", "CountryId")),
    /// )
    /// # }
    /// ```
    pub fn join_as<C: IntoCondition>(
        mut self,
        join: JoinType,
        table: &'static str,
        alias: &'static str,
        on: C,
    ) -> Self {
        if table == alias {
            self.statement.join(join, Name(table), on);
        } else {
            self.statement.join_as(join, Name(table), Name(alias), on);
        }
        self
    }

    /// The underlying statement.
    pub fn statement(&self) -> &SelectStatement {
        &self.statement
    }

    /// Render with `$n` placeholders.
    pub fn build(&self) -> (String, Values) {
        self.statement.build(PostgresQueryBuilder)
    }
}

impl<R: Row, S> fmt::Display for SqlQuery<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.statement.to_string(PostgresQueryBuilder))
    }
}

impl<R: Row, S> Clone for SqlQuery<R, S> {
    fn clone(&self) -> Self {
        Self {
            statement: self.statement.clone(),
            mode: self.mode,
            _marker: PhantomData,
        }
    }
}
