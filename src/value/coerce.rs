//! Coercion of driver-decoded values into a field's storage variant.
//!
//! PostgreSQL reports `INT4` for a `SERIAL` column and `INT8` for `COUNT(*)`;
//! rows declare whatever Rust type they like. Integer and floating point
//! values are widened or narrowed (with range checks) so that a loaded value
//! always has the variant of the field it lands in.

use sea_query::Value;
use std::fmt;

use super::types::is_null;

/// Error type for value extraction failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExtractionError {
    /// The value is null where a value was required
    NullValue,
    /// The value's variant cannot be converted into the requested one
    TypeMismatch {
        expected: String,
        actual: String,
    },
    /// The conversion is defined but failed (out of range, ...)
    ConversionError(String),
}

impl fmt::Display for ValueExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExtractionError::NullValue => write!(f, "Value is null"),
            ValueExtractionError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {expected}, got {actual}")
            }
            ValueExtractionError::ConversionError(msg) => {
                write!(f, "Conversion error: {msg}")
            }
        }
    }
}

impl std::error::Error for ValueExtractionError {}

/// Convert `value` into the variant of `like`.
///
/// `like` is usually a field's typed null (see `ValueType::null_value`).
/// Same-variant values pass through untouched, nulls become `like`'s null,
/// integers convert between widths (and into floats), `Float`/`Double`
/// convert into each other. Everything else is a `TypeMismatch`.
pub fn coerce(value: Value, like: &Value) -> Result<Value, ValueExtractionError> {
    if std::mem::discriminant(&value) == std::mem::discriminant(like) {
        return Ok(value);
    }
    if is_null(&value) {
        return Ok(like.clone());
    }

    if let Some(n) = integer(&value) {
        return match like {
            Value::TinyInt(_) => narrow(n, |v| Value::TinyInt(Some(v))),
            Value::SmallInt(_) => narrow(n, |v| Value::SmallInt(Some(v))),
            Value::Int(_) => narrow(n, |v| Value::Int(Some(v))),
            Value::BigInt(_) => narrow(n, |v| Value::BigInt(Some(v))),
            Value::TinyUnsigned(_) => narrow(n, |v| Value::TinyUnsigned(Some(v))),
            Value::SmallUnsigned(_) => narrow(n, |v| Value::SmallUnsigned(Some(v))),
            Value::Unsigned(_) => narrow(n, |v| Value::Unsigned(Some(v))),
            Value::BigUnsigned(_) => narrow(n, |v| Value::BigUnsigned(Some(v))),
            Value::Float(_) => Ok(Value::Float(Some(n as f32))),
            Value::Double(_) => Ok(Value::Double(Some(n as f64))),
            _ => Err(mismatch(like, &value)),
        };
    }

    match (value, like) {
        (Value::Float(Some(f)), Value::Double(_)) => Ok(Value::Double(Some(f64::from(f)))),
        (Value::Double(Some(d)), Value::Float(_)) => Ok(Value::Float(Some(d as f32))),
        (value, like) => Err(mismatch(like, &value)),
    }
}

/// The integer carried by any integer variant.
pub(crate) fn integer(value: &Value) -> Option<i128> {
    match value {
        Value::TinyInt(Some(v)) => Some(i128::from(*v)),
        Value::SmallInt(Some(v)) => Some(i128::from(*v)),
        Value::Int(Some(v)) => Some(i128::from(*v)),
        Value::BigInt(Some(v)) => Some(i128::from(*v)),
        Value::TinyUnsigned(Some(v)) => Some(i128::from(*v)),
        Value::SmallUnsigned(Some(v)) => Some(i128::from(*v)),
        Value::Unsigned(Some(v)) => Some(i128::from(*v)),
        Value::BigUnsigned(Some(v)) => Some(i128::from(*v)),
        _ => None,
    }
}

fn narrow<T, F>(n: i128, wrap: F) -> Result<Value, ValueExtractionError>
where
    T: TryFrom<i128>,
    F: FnOnce(T) -> Value,
{
    T::try_from(n)
        .map(wrap)
        .map_err(|_| ValueExtractionError::ConversionError(format!("{n} is out of range")))
}

fn mismatch(like: &Value, actual: &Value) -> ValueExtractionError {
    ValueExtractionError::TypeMismatch {
        expected: variant_name(like).to_string(),
        actual: format!("{actual:?}"),
    }
}

fn variant_name(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "Bool",
        Value::TinyInt(_) => "TinyInt",
        Value::SmallInt(_) => "SmallInt",
        Value::Int(_) => "Int",
        Value::BigInt(_) => "BigInt",
        Value::TinyUnsigned(_) => "TinyUnsigned",
        Value::SmallUnsigned(_) => "SmallUnsigned",
        Value::Unsigned(_) => "Unsigned",
        Value::BigUnsigned(_) => "BigUnsigned",
        Value::Float(_) => "Float",
        Value::Double(_) => "Double",
        Value::String(_) => "String",
        Value::Bytes(_) => "Bytes",
        Value::Json(_) => "Json",
        _ => "unsupported value",
    }
}
