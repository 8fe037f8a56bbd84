//! Value model shared by rows, criteria and executors.
//!
//! Every field value travels as a `sea_query::Value`. This module maps Rust
//! scalars onto those values, knows which variants are SQL `NULL`, coerces
//! driver-decoded values into a field's declared storage type, and defines the
//! contract identifier types must satisfy.
//!
//! - **`ValueType`** - Rust type <-> `sea_query::Value` variant
//! - **`coerce`** - widen/narrow a decoded value into a declared variant
//! - **`RowId`** - identifier types usable for by-ID addressing

pub mod coerce;
pub mod id;
pub mod types;

pub use coerce::{coerce, ValueExtractionError};
pub use id::RowId;
pub use types::{is_null, ValueType};
