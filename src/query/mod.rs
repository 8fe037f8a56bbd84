//! Statement building and execution for row types.
//!
//! # Architecture
//!
//! - **Select**: `SqlQuery`, a SELECT bound to one row type's table, with a
//!   typestate that forbids executing a query with no selected columns
//! - **Execution**: `get_single`, `get_first`, `list`, `count`, `exists`,
//!   `scalar`
//! - **Insert / Update / Delete**: `SqlInsert`, `SqlUpdate`, `SqlDelete`
//! - **Expected rows**: the affected-row policy checked after UPDATE and DELETE
//! - **Value Conversion**: SeaQuery `Value` to `ToSql` parameter conversion
//!
//! All statements render through `sea_query::PostgresQueryBuilder` with `$n`
//! placeholders; values are bound by the executor.

pub mod select;
#[doc(inline)]
pub use select::{Pending, Selected, SqlQuery};

pub mod execution;

pub mod insert;
#[doc(inline)]
pub use insert::SqlInsert;

pub mod update;
#[doc(inline)]
pub use update::SqlUpdate;

pub mod delete;
#[doc(inline)]
pub use delete::SqlDelete;

pub mod expected_rows;
#[doc(inline)]
pub use expected_rows::ExpectedRows;

pub(crate) mod value_conversion;
