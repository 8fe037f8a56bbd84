//! Macro implementations

pub mod row;

pub use row::derive_row;
