//! Identifier types.

use sea_query::Value;
use std::fmt;

use super::coerce::coerce;
use super::types::ValueType;

/// A type usable as a row identifier.
///
/// Each identifier-bearing row type picks exactly one `RowId` (its
/// `IdRow::Id`), so identifier comparisons are always made with a single
/// scalar type. Identifiers show up in error messages, hence `Display`.
pub trait RowId: ValueType + Clone + fmt::Debug + fmt::Display {
    /// Read an identifier back from the store, e.g. from `RETURNING "Id"`.
    ///
    /// Integer widths are reconciled with [`coerce`]; `None` if the value is
    /// null or cannot represent `Self`.
    fn from_db_value(value: Value) -> Option<Self> {
        coerce(value, &Self::null_value())
            .ok()
            .and_then(Self::from_value)
    }
}

impl RowId for i16 {}
impl RowId for i32 {}
impl RowId for i64 {}
impl RowId for u32 {}
impl RowId for u64 {}
impl RowId for String {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_read_back_into_i64() {
        assert_eq!(i64::from_db_value(Value::Int(Some(41))), Some(41));
    }

    #[test]
    fn test_null_identifier_is_none() {
        assert_eq!(i32::from_db_value(Value::Int(None)), None);
    }

    #[test]
    fn test_text_identifier() {
        assert_eq!(
            String::from_db_value(Value::String(Some("k-1".into()))),
            Some("k-1".to_string())
        );
        assert_eq!(String::from_db_value(Value::Int(Some(1))), None);
    }
}
