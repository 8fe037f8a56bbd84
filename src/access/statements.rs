//! INSERT / UPDATE statements derived from row state.

use crate::executor::RowError;
use crate::query::{SqlInsert, SqlUpdate};
use crate::row::{IdRow, Row};

/// Build the INSERT for `row`.
///
/// The column list is exactly the row's set, table-mapped fields. A
/// store-assigned (`IDENTITY`) identifier is left out even when set, and the
/// identifier field, if any, is marked for read-back.
///
/// # Errors
///
/// `RowError::NullArgument("row")` when the row's state is not bound to its
/// declared fields.
pub fn to_sql_insert<R: Row>(row: &R) -> Result<SqlInsert, RowError> {
    ensure_bound(row)?;
    let mut insert = SqlInsert::into_table(R::table_name());
    for field in row.set_table_fields() {
        if field.is_primary_key() && field.is_identity() {
            continue;
        }
        insert = insert.set(field, row.value(field));
    }
    if let Some(identifier) = R::identifier() {
        insert = insert.identity_column(identifier);
    }
    Ok(insert)
}

/// Build `UPDATE <table> SET <set fields> WHERE <id> = <current id>`.
///
/// # Errors
///
/// `RowError::InvalidPrecondition` when the identifier is null, before any
/// statement is built. `NullArgument("row")` as for [`to_sql_insert`].
pub fn to_sql_update_by_id<R: IdRow>(row: &R) -> Result<SqlUpdate, RowError> {
    ensure_bound(row)?;
    let id_field = R::id_field();
    if row.is_null(id_field) {
        return Err(RowError::InvalidPrecondition(
            "ID field of row has null value!".to_string(),
        ));
    }
    let mut update = SqlUpdate::table(R::table_name());
    for field in row.set_table_fields() {
        if field == id_field {
            continue;
        }
        update = update.set(field, row.value(field));
    }
    Ok(update.filter(id_field.eq(row.value(id_field))))
}

fn ensure_bound<R: Row>(row: &R) -> Result<(), RowError> {
    if row.state().len() == R::fields().len() {
        Ok(())
    } else {
        Err(RowError::NullArgument("row"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::tests::{AuditRow, CustomerRow};
    use crate::row::{RowState, TrackingMode};
    use sea_query::Value;

    #[test]
    fn test_insert_uses_only_set_fields() {
        let mut row = CustomerRow::new();
        row.set_name("Beta");
        let insert = to_sql_insert(&row).unwrap();
        assert_eq!(insert.columns(), &["Name"]);
        assert_eq!(insert.identity(), Some("Id"));
        let (sql, _) = insert.build().unwrap();
        assert_eq!(sql, r#"INSERT INTO "Customers" ("Name") VALUES ($1)"#);
    }

    #[test]
    fn test_insert_excludes_store_assigned_id() {
        let mut row = CustomerRow::new();
        row.set_id(99);
        row.set_name("Beta");
        assert_eq!(to_sql_insert(&row).unwrap().columns(), &["Name"]);
    }

    #[test]
    fn test_insert_of_loaded_row_depends_on_mode() {
        let mut checked = CustomerRow::with_mode(TrackingMode::WithChecks);
        checked.state_mut().load(&CustomerRow::NAME, "Acme".into()).unwrap();
        checked.state_mut().load(&CustomerRow::CITY, Value::String(None)).unwrap();
        assert_eq!(to_sql_insert(&checked).unwrap().columns(), &["Name", "City"]);

        let mut assigned = CustomerRow::with_mode(TrackingMode::Assignments);
        assigned.state_mut().load(&CustomerRow::NAME, "Acme".into()).unwrap();
        assert!(to_sql_insert(&assigned).unwrap().columns().is_empty());
    }

    #[test]
    fn test_insert_without_identifier() {
        let mut row = AuditRow::with_mode(TrackingMode::Assignments);
        row.assign(&AuditRow::MESSAGE, "hello".into());
        let insert = to_sql_insert(&row).unwrap();
        assert_eq!(insert.identity(), None);
    }

    #[test]
    fn test_unbound_row_is_a_null_argument() {
        let row = CustomerRow::from_state(RowState::new(&[], TrackingMode::Assignments));
        assert!(matches!(to_sql_insert(&row), Err(RowError::NullArgument("row"))));
        assert!(matches!(to_sql_update_by_id(&row), Err(RowError::NullArgument("row"))));
    }

    #[test]
    fn test_update_sets_everything_but_the_id() {
        let mut row = CustomerRow::new();
        row.set_id(7);
        row.set_name("Acme Ltd");
        let (sql, values) = to_sql_update_by_id(&row).unwrap().build().unwrap();
        assert_eq!(
            sql,
            r#"UPDATE "Customers" SET "Name" = $1 WHERE "Customers"."Id" = $2"#
        );
        assert_eq!(values.0[1], Value::BigInt(Some(7)));
    }

    #[test]
    fn test_update_with_null_id_fails_first() {
        let mut row = CustomerRow::new();
        row.set_name("Acme Ltd");
        match to_sql_update_by_id(&row) {
            Err(RowError::InvalidPrecondition(msg)) => {
                assert_eq!(msg, "ID field of row has null value!")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_update_with_only_id_set_has_nothing_to_set() {
        let mut row = CustomerRow::new();
        row.set_id(7);
        let err = to_sql_update_by_id(&row).unwrap().build().unwrap_err();
        assert!(matches!(err, RowError::QueryError(_)));
    }
}
