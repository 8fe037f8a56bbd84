//! Per-instance field state.

use sea_query::Value;

use super::field::FieldDef;
use crate::executor::RowError;
use crate::value::{coerce, is_null, ValueExtractionError, ValueType};

/// How a row decides which of its fields are *set*.
///
/// Fixed when the row is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingMode {
    /// Rows materialized from query results: every loaded column counts as
    /// set, and checked reads of columns the query did not return fail with
    /// [`RowError::FieldNotLoaded`].
    WithChecks,
    /// Only fields the caller assigned are set. Loaded values populate the
    /// row without counting as assignments.
    #[default]
    Assignments,
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    value: Value,
    assigned: bool,
    loaded: bool,
}

/// Values and set/loaded flags for each declared field of one row.
///
/// Slots are addressed by `FieldDef::index`. Fields of another table never
/// reach a slot: writes are dropped and reads see an unset null.
#[derive(Debug, Clone, PartialEq)]
pub struct RowState {
    mode: TrackingMode,
    table: &'static str,
    slots: Vec<Slot>,
}

impl RowState {
    /// An empty state for `fields`: every slot holds the field's typed null.
    pub fn new(fields: &[FieldDef], mode: TrackingMode) -> Self {
        let slots = fields
            .iter()
            .map(|f| Slot {
                value: f.null_value(),
                assigned: false,
                loaded: false,
            })
            .collect();
        let table = fields.first().map_or("", |f| f.table());
        Self { mode, table, slots }
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store a caller-supplied value and mark the field set.
    pub fn assign(&mut self, field: &FieldDef, value: Value) {
        match self.slot_mut(field) {
            Some(slot) => {
                slot.value = value;
                slot.assigned = true;
            }
            None => log::warn!("Ignoring assignment of {} to a row of '{}'", field, self.table),
        }
    }

    /// Store a value read from the store, converted into the field's
    /// storage variant.
    pub fn load(&mut self, field: &FieldDef, value: Value) -> Result<(), ValueExtractionError> {
        let value = coerce(value, &field.null_value())?;
        match self.slot_mut(field) {
            Some(slot) => {
                slot.value = value;
                slot.loaded = true;
            }
            None => log::warn!("Ignoring loaded {} in a row of '{}'", field, self.table),
        }
        Ok(())
    }

    /// Whether the field takes part in generated INSERT/UPDATE statements.
    pub fn is_set(&self, field: &FieldDef) -> bool {
        self.slot(field).is_some_and(|s| {
            s.assigned || (self.mode == TrackingMode::WithChecks && s.loaded)
        })
    }

    pub fn is_loaded(&self, field: &FieldDef) -> bool {
        self.slot(field).is_some_and(|s| s.loaded)
    }

    pub fn is_null(&self, field: &FieldDef) -> bool {
        self.slot(field).map_or(true, |s| is_null(&s.value))
    }

    /// The stored value, or the field's typed null.
    pub fn value(&self, field: &FieldDef) -> Value {
        self.slot(field)
            .map(|s| s.value.clone())
            .unwrap_or_else(|| field.null_value())
    }

    /// Like [`value`](Self::value), but in `WithChecks` mode a field that was
    /// neither loaded nor assigned is an error instead of a silent null.
    pub fn checked_value(&self, field: &FieldDef) -> Result<Value, RowError> {
        if self.mode == TrackingMode::WithChecks && !self.is_loaded(field) && !self.is_assigned(field) {
            return Err(RowError::FieldNotLoaded {
                table: field.table(),
                field: field.name(),
            });
        }
        Ok(self.value(field))
    }

    /// Typed read; `None` when the field is null.
    pub fn get<T: ValueType>(&self, field: &FieldDef) -> Option<T> {
        T::from_value(self.value(field))
    }

    /// Typed checked read.
    pub fn try_get<T: ValueType>(&self, field: &FieldDef) -> Result<Option<T>, RowError> {
        self.checked_value(field).map(T::from_value)
    }

    fn is_assigned(&self, field: &FieldDef) -> bool {
        self.slot(field).is_some_and(|s| s.assigned)
    }

    fn slot(&self, field: &FieldDef) -> Option<&Slot> {
        if field.table() != self.table {
            return None;
        }
        self.slots.get(field.index())
    }

    fn slot_mut(&mut self, field: &FieldDef) -> Option<&mut Slot> {
        if field.table() != self.table {
            return None;
        }
        self.slots.get_mut(field.index())
    }
}
