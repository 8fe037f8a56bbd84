//! # Rowguard
//!
//! Typed data access for PostgreSQL on the `may` coroutine runtime.
//!
//! Declare a row type with `#[derive(Row)]`, then fetch, count, insert,
//! update and delete rows through any [`RowExecutor`] without writing SQL.
//! Statements are built with SeaQuery and run on `may_postgres`.
//!
//! See [README on GitHub](https://github.com/microscaler/rowguard)

extern crate self as rowguard;

pub mod access;
pub mod config;
pub mod connection;
pub mod data_row;
pub mod executor;
pub mod metrics;
pub mod query;
pub mod row;
pub mod value;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use access::{to_sql_insert, to_sql_update_by_id, RowMutationExt, RowQueryExt};
pub use config::DatabaseConfig;
pub use connection::{connect, connect_with_config, ConnectionError};
pub use data_row::DataRow;
pub use executor::{MayPostgresExecutor, RowError, RowExecutor};
pub use query::{ExpectedRows, SqlDelete, SqlInsert, SqlQuery, SqlUpdate};
pub use row::{materialize, FieldDef, FieldFlags, IdRow, Name, Row, RowState, TrackingMode};
pub use value::{RowId, ValueType};

// Derive macro shares the trait's name, as with serde.
pub use rowguard_derive::Row;

// Generated code and criteria expressions speak SeaQuery.
pub use sea_query;
