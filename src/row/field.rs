//! Field descriptors.
//!
//! A `FieldDef` is a `const` description of one declared field of a row type:
//! where it lives in the row's state, which column (or SQL expression) backs
//! it, and what its storage variant is.

use sea_query::{Expr, ExprTrait, Iden, Value};
use std::fmt;

/// A plain SQL identifier, quoted by the query builder.
///
/// Table names, column names and join aliases are all `&'static str` in row
/// metadata; this wraps them for `sea-query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name(pub &'static str);

impl Iden for Name {
    fn unquoted(&self) -> &str {
        self.0
    }
}

/// Field flags (bit set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldFlags(u8);

impl FieldFlags {
    pub const NONE: FieldFlags = FieldFlags(0);
    /// The identifier field of its row.
    pub const PRIMARY_KEY: FieldFlags = FieldFlags(1);
    /// Assigned by the store (serial / identity column).
    pub const IDENTITY: FieldFlags = FieldFlags(1 << 1);

    pub const fn union(self, other: FieldFlags) -> FieldFlags {
        FieldFlags(self.0 | other.0)
    }

    pub const fn contains(self, other: FieldFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Descriptor of one declared field.
///
/// Built in `const` context by `#[derive(Row)]`:
///
/// ```rust
/// use rowguard::{FieldDef, ValueType};
///
/// const ID: FieldDef = FieldDef::new(0, "Customers", "id", "Id", <i64 as ValueType>::null_value)
///     .primary_key()
///     .identity();
/// assert!(ID.is_primary_key());
/// assert_eq!(ID.column(), "Id");
/// ```
#[derive(Clone, Copy)]
pub struct FieldDef {
    index: usize,
    table: &'static str,
    name: &'static str,
    column: &'static str,
    flags: FieldFlags,
    expression: Option<&'static str>,
    null: fn() -> Value,
}

impl FieldDef {
    /// `index` is the field's position in `Row::fields()`; `null` yields the
    /// typed null of the field's storage variant.
    pub const fn new(
        index: usize,
        table: &'static str,
        name: &'static str,
        column: &'static str,
        null: fn() -> Value,
    ) -> Self {
        Self {
            index,
            table,
            name,
            column,
            flags: FieldFlags::NONE,
            expression: None,
            null,
        }
    }

    pub const fn primary_key(mut self) -> Self {
        self.flags = self.flags.union(FieldFlags::PRIMARY_KEY);
        self
    }

    pub const fn identity(mut self) -> Self {
        self.flags = self.flags.union(FieldFlags::IDENTITY);
        self
    }

    /// Back this field with a SQL expression instead of a table column.
    ///
    /// Expression fields are never part of "select all table fields", INSERT
    /// or UPDATE; a customized query selects them explicitly and the result
    /// column is aliased to [`column`](Self::column).
    pub const fn expression(mut self, sql: &'static str) -> Self {
        self.expression = Some(sql);
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    pub fn is_primary_key(&self) -> bool {
        self.flags.contains(FieldFlags::PRIMARY_KEY)
    }

    pub fn is_identity(&self) -> bool {
        self.flags.contains(FieldFlags::IDENTITY)
    }

    /// True for fields backed by a column of the row's own table.
    pub fn is_table_field(&self) -> bool {
        self.expression.is_none()
    }

    pub fn sql_expression(&self) -> Option<&'static str> {
        self.expression
    }

    /// The typed null of this field's storage variant.
    pub fn null_value(&self) -> Value {
        (self.null)()
    }

    /// The field as a SQL expression: `"table"."column"` or its custom SQL.
    pub fn col(&self) -> Expr {
        match self.expression {
            Some(sql) => Expr::cust(sql),
            None => Expr::col((Name(self.table), Name(self.column))),
        }
    }

    pub fn eq<V: Into<Value>>(&self, value: V) -> Expr {
        self.col().eq(value)
    }

    pub fn ne<V: Into<Value>>(&self, value: V) -> Expr {
        self.col().ne(value)
    }

    pub fn gt<V: Into<Value>>(&self, value: V) -> Expr {
        self.col().gt(value)
    }

    pub fn gte<V: Into<Value>>(&self, value: V) -> Expr {
        self.col().gte(value)
    }

    pub fn lt<V: Into<Value>>(&self, value: V) -> Expr {
        self.col().lt(value)
    }

    pub fn lte<V: Into<Value>>(&self, value: V) -> Expr {
        self.col().lte(value)
    }

    pub fn like(&self, pattern: &str) -> Expr {
        self.col().like(pattern)
    }

    pub fn is_null(&self) -> Expr {
        self.col().is_null()
    }

    pub fn is_not_null(&self) -> Expr {
        self.col().is_not_null()
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn is_in<V, I>(&self, values: I) -> Expr
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        self.col().is_in(values)
    }
}

impl PartialEq for FieldDef {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.index == other.index && self.column == other.column
    }
}

impl Eq for FieldDef {}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("index", &self.index)
            .field("table", &self.table)
            .field("name", &self.name)
            .field("column", &self.column)
            .field("flags", &self.flags)
            .field("expression", &self.expression)
            .finish()
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}
