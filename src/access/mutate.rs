//! Mutation: insert, update-by-id and delete-by-id.

use super::statements::{to_sql_insert, to_sql_update_by_id};
use crate::executor::{RowError, RowExecutor};
use crate::query::{ExpectedRows, SqlDelete};
use crate::row::{IdRow, Row};
use crate::value::ValueType;

/// Mutation operations, available on every [`RowExecutor`].
///
/// Statements are derived from the row's *set* fields (see
/// [`to_sql_insert`] and [`to_sql_update_by_id`]). Updates and deletes check
/// the affected-row count, by default [`ExpectedRows::One`].
pub trait RowMutationExt: RowExecutor {
    /// Persist `row`.
    fn insert<R: Row>(&self, row: &R) -> Result<(), RowError> {
        to_sql_insert(row)?.execute(self)?;
        Ok(())
    }

    /// Persist `row` and return the identifier the store assigned (or the
    /// one the row carried), `None` if the store returned nothing.
    fn insert_and_get_id<R: IdRow>(&self, row: &R) -> Result<Option<R::Id>, RowError> {
        to_sql_insert(row)?.execute_and_get_id::<R::Id, Self>(self)
    }

    /// Update the set fields of `row`, addressed by its identifier. Exactly
    /// one row must be affected.
    fn update_by_id<R: IdRow>(&self, row: &R) -> Result<(), RowError> {
        self.update_by_id_expecting(row, ExpectedRows::One)
    }

    fn update_by_id_expecting<R: IdRow>(&self, row: &R, expected: ExpectedRows) -> Result<(), RowError> {
        to_sql_update_by_id(row)?.execute(self, expected)?;
        Ok(())
    }

    /// Delete the row with identifier `id`. Exactly one row must be
    /// affected; returns the affected count.
    fn delete_by_id<R: IdRow>(&self, id: R::Id) -> Result<u64, RowError> {
        self.delete_by_id_expecting::<R>(id, ExpectedRows::One)
    }

    fn delete_by_id_expecting<R: IdRow>(&self, id: R::Id, expected: ExpectedRows) -> Result<u64, RowError> {
        SqlDelete::from_table(R::table_name())
            .filter(R::id_field().eq(id.into_value()))
            .execute(self, expected)
    }
}

impl<E: RowExecutor + ?Sized> RowMutationExt for E {}
