//! Value conversion from SeaQuery to may_postgres parameters.
//!
//! Each `sea_query::Value` is boxed as the Rust type PostgreSQL expects for
//! its variant, nulls included: a `Value::BigInt(None)` binds as
//! `Option<i64>`, so the server sees a typed `NULL` for an `INT8` parameter.

use crate::executor::RowError;
use may_postgres::types::ToSql;
use sea_query::{Value, Values};

/// Convert SeaQuery values to may_postgres `ToSql` parameters and run `f`
/// with them.
///
/// # Errors
///
/// Returns `RowError::Other` for variants that have no PostgreSQL binding
/// here, or for unsigned values that do not fit the signed column type.
pub fn with_converted_params<F, R>(values: &Values, f: F) -> Result<R, RowError>
where
    F: FnOnce(&[&dyn ToSql]) -> Result<R, RowError>,
{
    let boxed = values
        .iter()
        .map(to_sql)
        .collect::<Result<Vec<Box<dyn ToSql>>, RowError>>()?;
    let params: Vec<&dyn ToSql> = boxed.iter().map(|p| &**p).collect();
    f(&params)
}

fn to_sql(value: &Value) -> Result<Box<dyn ToSql>, RowError> {
    let param: Box<dyn ToSql> = match value {
        Value::Bool(v) => Box::new(*v),
        Value::TinyInt(v) => Box::new(v.map(i16::from)),
        Value::SmallInt(v) => Box::new(*v),
        Value::Int(v) => Box::new(*v),
        Value::BigInt(v) => Box::new(*v),
        Value::TinyUnsigned(v) => Box::new(v.map(i16::from)),
        Value::SmallUnsigned(v) => Box::new(v.map(i32::from)),
        Value::Unsigned(v) => Box::new(v.map(i64::from)),
        Value::BigUnsigned(v) => Box::new(
            v.map(|u| {
                i64::try_from(u).map_err(|_| {
                    RowError::Other(format!(
                        "BigUnsigned value {u} exceeds i64::MAX ({}), cannot be safely cast to i64",
                        i64::MAX
                    ))
                })
            })
            .transpose()?,
        ),
        Value::Float(v) => Box::new(*v),
        Value::Double(v) => Box::new(*v),
        Value::String(v) => Box::new(v.clone()),
        Value::Bytes(v) => Box::new(v.clone()),
        Value::Json(v) => Box::new(v.as_deref().cloned()),
        _ => {
            return Err(RowError::Other(format!(
                "Unsupported value type in query: {value:?}"
            )));
        }
    };
    Ok(param)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_value_becomes_one_parameter() {
        let values = Values(vec![
            Value::Int(Some(1)),
            Value::BigInt(None),
            Value::String(Some("Acme".into())),
            Value::Bool(None),
            Value::Json(Some(Box::new(serde_json::json!({"k": 1})))),
            Value::Unsigned(Some(9)),
        ]);
        let count = with_converted_params(&values, |params| Ok(params.len())).unwrap();
        assert_eq!(count, 6);
    }

    #[test]
    fn test_empty_values() {
        let count = with_converted_params(&Values(vec![]), |params| Ok(params.len())).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_big_unsigned_overflow_is_rejected() {
        let values = Values(vec![Value::BigUnsigned(Some(u64::MAX))]);
        let err = with_converted_params(&values, |_| Ok(())).unwrap_err();
        assert!(err.to_string().contains("exceeds i64::MAX"));
    }

    #[test]
    fn test_closure_error_is_propagated() {
        let values = Values(vec![Value::Int(Some(1))]);
        let err = with_converted_params::<_, ()>(&values, |_| Err(RowError::QueryError("boom".into())))
            .unwrap_err();
        assert!(matches!(err, RowError::QueryError(_)));
    }
}
