//! `ValueType`: mapping Rust scalars onto `sea_query::Value` variants.

use sea_query::Value;

/// Maps a Rust type onto exactly one `sea_query::Value` variant.
///
/// The variant chosen here is the field's *storage type*: typed getters read
/// it back, typed setters write it, and `null_value` is what an unset or
/// explicitly-null field binds as.
///
/// ```rust
/// use rowguard::ValueType;
/// use sea_query::Value;
///
/// assert!(matches!(42i32.into_value(), Value::Int(Some(42))));
/// assert!(matches!(None::<i32>.into_value(), Value::Int(None)));
/// assert_eq!(i64::from_value(Value::BigInt(Some(7))), Some(7));
/// ```
pub trait ValueType: Sized {
    /// Wrap this value in its `Value` variant.
    fn into_value(self) -> Value;

    /// Unwrap a value of the matching variant. `None` for nulls and for
    /// any other variant.
    fn from_value(value: Value) -> Option<Self>;

    /// The typed `NULL` of this type's variant.
    fn null_value() -> Value;
}

macro_rules! value_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ValueType for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(Some(self))
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => v,
                        _ => None,
                    }
                }

                fn null_value() -> Value {
                    Value::$variant(None)
                }
            }
        )*
    };
}

value_type! {
    bool => Bool,
    i8 => TinyInt,
    i16 => SmallInt,
    i32 => Int,
    i64 => BigInt,
    u8 => TinyUnsigned,
    u16 => SmallUnsigned,
    u32 => Unsigned,
    u64 => BigUnsigned,
    f32 => Float,
    f64 => Double,
    String => String,
    Vec<u8> => Bytes,
}

impl ValueType for serde_json::Value {
    fn into_value(self) -> Value {
        Value::Json(Some(Box::new(self)))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Json(Some(v)) => Some(*v),
            _ => None,
        }
    }

    fn null_value() -> Value {
        Value::Json(None)
    }
}

impl<T: ValueType> ValueType for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => T::null_value(),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(T::from_value(value))
    }

    fn null_value() -> Value {
        T::null_value()
    }
}

/// True when `value` is the `NULL` of its variant.
///
/// Only the variants produced by [`ValueType`] and by the executors are
/// recognised; anything else is treated as non-null.
pub fn is_null(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None)
            | Value::Bytes(None)
            | Value::Json(None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_round_trip_keeps_variant() {
        assert!(matches!(true.into_value(), Value::Bool(Some(true))));
        assert!(matches!(7i64.into_value(), Value::BigInt(Some(7))));
        assert!(matches!("x".to_string().into_value(), Value::String(Some(ref s)) if s == "x"));
        assert_eq!(String::from_value(Value::String(Some("y".into()))), Some("y".to_string()));
    }

    #[test]
    fn test_from_value_rejects_other_variants() {
        assert_eq!(i32::from_value(Value::BigInt(Some(1))), None);
        assert_eq!(bool::from_value(Value::Int(Some(1))), None);
    }

    #[test]
    fn test_option_maps_none_to_typed_null() {
        assert!(matches!(None::<String>.into_value(), Value::String(None)));
        assert_eq!(Option::<i32>::from_value(Value::Int(None)), Some(None));
        assert_eq!(Option::<i32>::from_value(Value::Int(Some(3))), Some(Some(3)));
    }

    #[test]
    fn test_json_is_boxed() {
        let json = serde_json::json!({"a": 1});
        let value = json.clone().into_value();
        assert_eq!(serde_json::Value::from_value(value), Some(json));
    }

    #[test]
    fn test_is_null() {
        assert!(is_null(&Value::String(None)));
        assert!(is_null(&i64::null_value()));
        assert!(!is_null(&Value::Int(Some(0))));
        assert!(!is_null(&Value::String(Some(String::new()))));
    }
}
