//! Procedural macros for Rowguard
//!
//! This crate provides the `Row` derive.

mod attributes;
mod macros;
mod utils;

use proc_macro::TokenStream;

/// Derive macro for `Row` - generates a `<Name>Row` type bound to one table
///
/// This macro generates:
/// - `<Name>Row` struct wrapping a `rowguard::RowState`
/// - One `FieldDef` constant per field (`SCREAMING_SNAKE_CASE`)
/// - Typed getters, checked `try_` getters, setters and `set_<field>_null`
/// - `from_model()` / `to_model()` conversions to and from the plain struct
/// - `rowguard::Row`, plus `rowguard::IdRow` when a field is `#[primary_key]`
///
/// Attributes:
/// - `#[table_name = "..."]` on the struct (default: snake_case struct name)
/// - `#[column_name = "..."]` on a field (default: the field name)
/// - `#[primary_key]`, `#[auto_increment]` (store-assigned identifier)
/// - `#[expression = "SQL"]`: a computed, read-only column
///
/// # Example
///
/// ```ignore
/// use rowguard::Row;
///
/// #[derive(Row)]
/// #[table_name = "Customers"]
/// pub struct Customer {
///     #[primary_key]
///     #[auto_increment]
///     #[column_name = "Id"]
///     pub id: i64,
///     #[column_name = "Name"]
///     pub name: String,
///     #[column_name = "City"]
///     pub city: Option<String>,
/// }
///
/// let mut row = CustomerRow::new();
/// row.set_name("Beta".to_string());
/// ```
#[proc_macro_derive(Row, attributes(table_name, column_name, primary_key, auto_increment, expression))]
pub fn derive_row(input: TokenStream) -> TokenStream {
    macros::derive_row(input)
}
