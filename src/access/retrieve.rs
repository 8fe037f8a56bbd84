//! Retrieval: by identifier, by criteria, lists, counts and existence checks.

use sea_query::IntoCondition;

use crate::executor::{RowError, RowExecutor};
use crate::query::{Pending, Selected, SqlQuery};
use crate::row::{IdRow, Row, TrackingMode};
use crate::value::ValueType;

/// Retrieval operations, available on every [`RowExecutor`].
///
/// Rows come back in [`TrackingMode::WithChecks`]: checked reads
/// ([`RowState::try_get`](crate::RowState::try_get), generated `try_*`
/// getters) of unselected fields fail, plain getters return `None`. Each
/// operation has a
/// `try_` flavor that returns `None` when nothing matches and a strict
/// flavor that reports [`RowError::RecordNotFound`] instead. The `_with`
/// flavors hand the query to a callback instead of selecting every table
/// field; the callback must select the columns it needs.
///
/// ```no_run
/// use rowguard::{Row, RowQueryExt, RowError, connect_with_config, DatabaseConfig};
///
/// #[derive(Row)]
/// #[table_name = "Customers"]
/// struct Customer {
///     #[primary_key]
///     #[auto_increment]
///     #[column_name = "Id"]
///     id: i64,
///     #[column_name = "Name"]
///     name: String,
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let db = connect_with_config(&DatabaseConfig::load()?)?;
/// let acme = db.by_id::<CustomerRow>(7)?;
/// assert_eq!(acme.name().as_deref(), Some("Acme"));
///
/// let betas = db.count::<CustomerRow, _>(CustomerRow::NAME.eq("Beta"))?;
/// # Ok(())
/// # }
/// ```
pub trait RowQueryExt: RowExecutor {
    /// The row with identifier `id`, if any.
    fn try_by_id<R: IdRow>(&self, id: R::Id) -> Result<Option<R>, RowError> {
        by_id_query::<R>(&id).select_table_fields().get_single(self)
    }

    /// The row with identifier `id`.
    fn by_id<R: IdRow>(&self, id: R::Id) -> Result<R, RowError> {
        let rendered = id.to_string();
        self.try_by_id::<R>(id)?.ok_or_else(|| not_found_by_id::<R>(rendered))
    }

    /// Like [`try_by_id`](Self::try_by_id), with `customize` applied after
    /// the identifier filter.
    fn try_by_id_with<R, F>(&self, id: R::Id, customize: F) -> Result<Option<R>, RowError>
    where
        R: IdRow,
        F: FnOnce(SqlQuery<R, Pending>) -> SqlQuery<R, Selected>,
    {
        customize(by_id_query::<R>(&id)).get_single(self)
    }

    fn by_id_with<R, F>(&self, id: R::Id, customize: F) -> Result<R, RowError>
    where
        R: IdRow,
        F: FnOnce(SqlQuery<R, Pending>) -> SqlQuery<R, Selected>,
    {
        let rendered = id.to_string();
        self.try_by_id_with::<R, F>(id, customize)?
            .ok_or_else(|| not_found_by_id::<R>(rendered))
    }

    /// The single row matching `criteria`, if any.
    ///
    /// More than one match is [`RowError::TooManyRecords`].
    fn try_single<R, C>(&self, criteria: C) -> Result<Option<R>, RowError>
    where
        R: Row,
        C: IntoCondition,
    {
        query::<R>().filter(criteria).select_table_fields().get_single(self)
    }

    fn single<R, C>(&self, criteria: C) -> Result<R, RowError>
    where
        R: Row,
        C: IntoCondition,
    {
        self.try_single::<R, C>(criteria)?.ok_or_else(not_found::<R>)
    }

    fn try_single_with<R, F>(&self, customize: F) -> Result<Option<R>, RowError>
    where
        R: Row,
        F: FnOnce(SqlQuery<R, Pending>) -> SqlQuery<R, Selected>,
    {
        customize(query::<R>()).get_single(self)
    }

    fn single_with<R, F>(&self, customize: F) -> Result<R, RowError>
    where
        R: Row,
        F: FnOnce(SqlQuery<R, Pending>) -> SqlQuery<R, Selected>,
    {
        self.try_single_with::<R, F>(customize)?.ok_or_else(not_found::<R>)
    }

    /// The first row matching `criteria`, if any. Ordering is up to the
    /// caller.
    fn try_first<R, C>(&self, criteria: C) -> Result<Option<R>, RowError>
    where
        R: Row,
        C: IntoCondition,
    {
        query::<R>().filter(criteria).select_table_fields().get_first(self)
    }

    fn first<R, C>(&self, criteria: C) -> Result<R, RowError>
    where
        R: Row,
        C: IntoCondition,
    {
        self.try_first::<R, C>(criteria)?.ok_or_else(not_found::<R>)
    }

    fn try_first_with<R, F>(&self, customize: F) -> Result<Option<R>, RowError>
    where
        R: Row,
        F: FnOnce(SqlQuery<R, Pending>) -> SqlQuery<R, Selected>,
    {
        customize(query::<R>()).get_first(self)
    }

    fn first_with<R, F>(&self, customize: F) -> Result<R, RowError>
    where
        R: Row,
        F: FnOnce(SqlQuery<R, Pending>) -> SqlQuery<R, Selected>,
    {
        self.try_first_with::<R, F>(customize)?.ok_or_else(not_found::<R>)
    }

    /// Every row matching `criteria`, in result-set order.
    fn list<R, C>(&self, criteria: C) -> Result<Vec<R>, RowError>
    where
        R: Row,
        C: IntoCondition,
    {
        query::<R>().filter(criteria).select_table_fields().list(self)
    }

    fn list_with<R, F>(&self, customize: F) -> Result<Vec<R>, RowError>
    where
        R: Row,
        F: FnOnce(SqlQuery<R, Pending>) -> SqlQuery<R, Selected>,
    {
        customize(query::<R>()).list(self)
    }

    /// Number of rows matching `criteria`.
    fn count<R, C>(&self, criteria: C) -> Result<u64, RowError>
    where
        R: Row,
        C: IntoCondition,
    {
        query::<R>().filter(criteria).count(self)
    }

    /// Whether a row with identifier `id` exists.
    fn exists_by_id<R: IdRow>(&self, id: R::Id) -> Result<bool, RowError> {
        by_id_query::<R>(&id).exists(self)
    }

    /// Whether any row matches `criteria`.
    fn exists<R, C>(&self, criteria: C) -> Result<bool, RowError>
    where
        R: Row,
        C: IntoCondition,
    {
        query::<R>().filter(criteria).exists(self)
    }
}

impl<E: RowExecutor + ?Sized> RowQueryExt for E {}

fn query<R: Row>() -> SqlQuery<R, Pending> {
    SqlQuery::from_row(&R::with_mode(TrackingMode::WithChecks))
}

fn by_id_query<R: IdRow>(id: &R::Id) -> SqlQuery<R, Pending> {
    query::<R>().filter(R::id_field().eq(id.clone().into_value()))
}

fn not_found_by_id<R: Row>(id: String) -> RowError {
    RowError::RecordNotFound {
        table: R::table_name(),
        id: Some(id),
    }
}

fn not_found<R: Row>() -> RowError {
    RowError::RecordNotFound {
        table: R::table_name(),
        id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_row::DataRow;
    use crate::row::tests::CustomerRow;
    use crate::test_helpers::MockExecutor;
    use sea_query::{Condition, Expr, Value};

    fn acme() -> DataRow {
        DataRow::from_pairs([
            ("Id", Value::Int(Some(7))),
            ("Name", Value::String(Some("Acme".into()))),
            ("City", Value::String(Some("Oslo".into()))),
        ])
    }

    #[test]
    fn test_try_by_id_found() {
        let db = MockExecutor::new();
        db.push_rows(vec![acme()]);
        let row = db.try_by_id::<CustomerRow>(7).unwrap().unwrap();
        assert_eq!(row.name(), Some("Acme".to_string()));
        assert_eq!(row.mode(), TrackingMode::WithChecks);

        let stmt = db.last().unwrap();
        assert_eq!(
            stmt.sql,
            r#"SELECT "Customers"."Id", "Customers"."Name", "Customers"."City" FROM "Customers" WHERE "Customers"."Id" = $1 LIMIT $2"#
        );
        assert_eq!(stmt.values[0], Value::BigInt(Some(7)));
    }

    #[test]
    fn test_try_by_id_missing_is_none() {
        let db = MockExecutor::new();
        assert!(db.try_by_id::<CustomerRow>(8).unwrap().is_none());
    }

    #[test]
    fn test_by_id_missing_is_record_not_found() {
        let db = MockExecutor::new();
        let err = db.by_id::<CustomerRow>(8).unwrap_err();
        assert!(err.is_not_found());
        let msg = err.to_string();
        assert!(msg.contains("Customers") && msg.contains('8'), "{msg}");
    }

    #[test]
    fn test_by_id_with_skips_automatic_selection() {
        let db = MockExecutor::new();
        db.push_rows(vec![DataRow::from_pairs([("Name", Value::String(Some("Acme".into())))])]);
        let row = db
            .by_id_with::<CustomerRow, _>(7, |q| q.select(&CustomerRow::NAME))
            .unwrap();
        assert_eq!(row.name(), Some("Acme".to_string()));
        assert_eq!(row.state().get::<String>(&CustomerRow::CITY), None);
        assert!(matches!(
            row.state().try_get::<String>(&CustomerRow::CITY),
            Err(RowError::FieldNotLoaded { field: "city", .. })
        ));
        assert!(db.sql()[0].starts_with(r#"SELECT "Customers"."Name" FROM "Customers" WHERE "Customers"."Id" = $1"#));
    }

    #[test]
    fn test_single_family() {
        let db = MockExecutor::new();
        db.push_rows(vec![acme()]);
        let row: CustomerRow = db.single(CustomerRow::NAME.eq("Acme")).unwrap();
        assert_eq!(row.id(), Some(7));

        let err = db.single::<CustomerRow, _>(CustomerRow::NAME.eq("Nobody")).unwrap_err();
        assert_eq!(err.to_string(), "Query returned no results!");

        db.push_rows(vec![acme(), acme()]);
        let err = db.try_single::<CustomerRow, _>(CustomerRow::CITY.eq("Oslo")).unwrap_err();
        assert!(matches!(err, RowError::TooManyRecords { .. }));
    }

    #[test]
    fn test_first_family_takes_first_match() {
        let db = MockExecutor::new();
        db.push_rows(vec![acme()]);
        let row = db
            .first_with::<CustomerRow, _>(|q| {
                q.select_table_fields()
                    .filter(CustomerRow::CITY.eq("Oslo"))
                    .order_by(&CustomerRow::NAME, sea_query::Order::Asc)
            })
            .unwrap();
        assert_eq!(row.id(), Some(7));
        assert!(db.sql()[0].ends_with(r#"ORDER BY "Customers"."Name" ASC LIMIT $2"#));

        assert!(db.try_first::<CustomerRow, _>(Condition::all()).unwrap().is_none());
        assert!(db.first::<CustomerRow, _>(Condition::all()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_single_with_family() {
        let db = MockExecutor::new();
        let err = db
            .single_with::<CustomerRow, _>(|q| {
                q.select_table_fields().filter(CustomerRow::NAME.eq("Nobody"))
            })
            .unwrap_err();
        assert!(matches!(
            err,
            RowError::RecordNotFound { table: "Customers", id: None }
        ));
        assert_eq!(err.to_string(), "Query returned no results!");

        assert!(db
            .try_single_with::<CustomerRow, _>(|q| q.select(&CustomerRow::NAME))
            .unwrap()
            .is_none());

        db.push_rows(vec![acme()]);
        let row = db
            .try_single_with::<CustomerRow, _>(|q| {
                q.select_table_fields().filter(CustomerRow::NAME.eq("Acme"))
            })
            .unwrap()
            .unwrap();
        assert_eq!(row.id(), Some(7));
        assert!(db.sql()[2].ends_with("LIMIT $2"), "{}", db.sql()[2]);
    }

    #[test]
    fn test_try_first_with_missing_is_none() {
        let db = MockExecutor::new();
        let row = db
            .try_first_with::<CustomerRow, _>(|q| {
                q.select_table_fields().filter(CustomerRow::CITY.eq("Rome"))
            })
            .unwrap();
        assert!(row.is_none());
        assert!(db.sql()[0].contains(r#""Customers"."City" = $1"#));
    }

    #[test]
    fn test_by_id_with_missing_is_record_not_found() {
        let db = MockExecutor::new();
        let err = db
            .by_id_with::<CustomerRow, _>(8, |q| q.select(&CustomerRow::NAME))
            .unwrap_err();
        assert!(matches!(
            err,
            RowError::RecordNotFound { table: "Customers", id: Some(ref id) } if id == "8"
        ));
        assert_eq!(err.to_string(), "Can't locate 'Customers' record with ID 8!");
    }

    #[test]
    fn test_inserted_row_reads_back() {
        use crate::access::RowMutationExt;

        let db = MockExecutor::new();
        let mut beta = CustomerRow::new();
        beta.set_name("Beta");
        db.push_rows(vec![DataRow::from_pairs([("Id", Value::BigInt(Some(41)))])]);
        let id = db.insert_and_get_id(&beta).unwrap().unwrap();

        let inserted = db.last().unwrap();
        assert_eq!(inserted.values, vec![Value::String(Some("Beta".into()))]);
        db.push_rows(vec![DataRow::from_pairs([
            ("Id", Value::BigInt(Some(id))),
            ("Name", inserted.values[0].clone()),
            ("City", Value::String(None)),
        ])]);

        let read = db.by_id::<CustomerRow>(id).unwrap();
        assert_eq!(read.id(), Some(41));
        assert_eq!(read.name(), beta.name());
        assert_eq!(read.state().try_get::<String>(&CustomerRow::CITY).unwrap(), None);
        assert!(read.is_set(&CustomerRow::CITY));
    }

    #[test]
    fn test_list_and_count_agree() {
        let db = MockExecutor::new();
        db.push_rows(vec![acme(), acme()]);
        db.push_rows(vec![DataRow::from_pairs([("count", Value::BigInt(Some(2)))])]);
        let rows = db.list::<CustomerRow, _>(CustomerRow::CITY.eq("Oslo")).unwrap();
        let n = db.count::<CustomerRow, _>(CustomerRow::CITY.eq("Oslo")).unwrap();
        assert_eq!(rows.len() as u64, n);

        assert!(db.list::<CustomerRow, _>(CustomerRow::CITY.eq("Rome")).unwrap().is_empty());
    }

    #[test]
    fn test_list_with_custom_projection() {
        let db = MockExecutor::new();
        db.list_with::<CustomerRow, _>(|q| {
            q.select(&CustomerRow::ID)
                .select(&CustomerRow::ORDER_COUNT)
                .filter(Expr::cust(r#""Customers"."Id" > 100"#))
        })
        .unwrap();
        let sql = &db.sql()[0];
        assert!(sql.contains(r#"AS "OrderCount""#), "{sql}");
        assert!(!sql.contains("LIMIT"), "{sql}");
    }

    #[test]
    fn test_exists_by_id_matches_try_by_id() {
        let db = MockExecutor::new();
        db.push_rows(vec![DataRow::from_pairs([("?column?", Value::Int(Some(1)))])]);
        assert!(db.exists_by_id::<CustomerRow>(7).unwrap());
        assert!(!db.exists_by_id::<CustomerRow>(8).unwrap());
        assert_eq!(
            db.sql()[0],
            r#"SELECT 1 FROM "Customers" WHERE "Customers"."Id" = $1 LIMIT $2"#
        );
    }

    #[test]
    fn test_exists_by_criteria() {
        let db = MockExecutor::new();
        assert!(!db.exists::<CustomerRow, _>(CustomerRow::NAME.like("Zed%")).unwrap());
        assert!(db.sql()[0].contains(r#""Customers"."Name" LIKE $1"#));
    }

    #[test]
    fn test_failures_propagate_from_try_variants() {
        let db = MockExecutor::new();
        db.push_error("relation \"Customers\" does not exist");
        let err = db.try_by_id::<CustomerRow>(7).unwrap_err();
        assert!(matches!(err, RowError::QueryError(_)));
    }

    #[test]
    fn test_works_through_dyn_executor() {
        let db = MockExecutor::new();
        db.push_rows(vec![acme()]);
        let dyn_db: &dyn RowExecutor = &db;
        assert!(dyn_db.try_by_id::<CustomerRow>(7).unwrap().is_some());
    }
}
