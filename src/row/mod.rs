//! Row model: typed records bound to one table.
//!
//! A row type describes its table and fields once (`Row::fields()`, usually
//! generated by `#[derive(Row)]`) and carries a [`RowState`] per instance.
//! Everything generic in the crate works through this trait: the query
//! builder selects `fields()`, materialization loads result columns into the
//! state, and INSERT/UPDATE statements are derived from the fields that are
//! *set*.

pub mod field;
pub mod state;

pub use field::{FieldDef, FieldFlags, Name};
pub use state::{RowState, TrackingMode};

use sea_query::Value;

use crate::data_row::DataRow;
use crate::executor::RowError;
use crate::value::{RowId, ValueType};

/// A typed record bound to exactly one table.
///
/// Implementations supply metadata and access to their [`RowState`];
/// construction goes through [`from_state`](Row::from_state), so the
/// façade never needs `Default`.
pub trait Row: Sized {
    /// Name of the table every instance is bound to.
    fn table_name() -> &'static str;

    /// Declared fields, ordered by `FieldDef::index`.
    fn fields() -> &'static [FieldDef];

    /// Wrap an existing state.
    fn from_state(state: RowState) -> Self;

    fn state(&self) -> &RowState;

    fn state_mut(&mut self) -> &mut RowState;

    /// A fresh row with every field unset.
    fn with_mode(mode: TrackingMode) -> Self {
        Self::from_state(RowState::new(Self::fields(), mode))
    }

    fn mode(&self) -> TrackingMode {
        self.state().mode()
    }

    /// The field flagged `PRIMARY_KEY`, if any.
    fn identifier() -> Option<&'static FieldDef> {
        Self::fields().iter().find(|f| f.is_primary_key())
    }

    fn is_set(&self, field: &FieldDef) -> bool {
        self.state().is_set(field)
    }

    fn is_null(&self, field: &FieldDef) -> bool {
        self.state().is_null(field)
    }

    fn value(&self, field: &FieldDef) -> Value {
        self.state().value(field)
    }

    /// Assign one of this row type's fields. Fields of other row types are
    /// ignored.
    fn assign(&mut self, field: &FieldDef, value: Value) {
        if Self::fields().get(field.index()) != Some(field) {
            log::warn!("Ignoring assignment of {} to a row of '{}'", field, Self::table_name());
            return;
        }
        self.state_mut().assign(field, value);
    }

    /// Table-mapped fields that are currently set, in declaration order.
    fn set_table_fields(&self) -> Vec<&'static FieldDef> {
        Self::fields()
            .iter()
            .filter(|f| f.is_table_field() && self.is_set(f))
            .collect()
    }
}

/// A row type with an identifier field.
pub trait IdRow: Row {
    /// The single identifier type of this row type.
    type Id: RowId;

    fn id_field() -> &'static FieldDef;

    /// The current identifier, `None` while it is null.
    fn id(&self) -> Option<Self::Id> {
        Self::Id::from_value(self.value(Self::id_field()))
    }

    fn set_id(&mut self, id: Self::Id) {
        self.assign(Self::id_field(), id.into_value());
    }
}

/// Build a row of type `R` from a result row.
///
/// Columns are matched to fields by column name, exactly first and then
/// ignoring ASCII case. Columns without a matching field are skipped.
pub fn materialize<R: Row>(data: &DataRow, mode: TrackingMode) -> Result<R, RowError> {
    let mut row = R::with_mode(mode);
    for field in R::fields() {
        let Some(value) = data.get_by_name(field.column()) else {
            continue;
        };
        row.state_mut()
            .load(field, value.clone())
            .map_err(|e| RowError::ParseError(format!("column '{}': {e}", field.column())))?;
    }
    Ok(row)
}
