//! The data-access façade.
//!
//! Every [`RowExecutor`](crate::RowExecutor) gains two extension traits:
//!
//! - [`RowQueryExt`]: fetch by identifier or criteria (`by_id`, `single`,
//!   `first`, `list`, `count`, `exists`), each with a strict form that
//!   fails when nothing matches and a `try_` form that returns `None`
//! - [`RowMutationExt`]: `insert`, `insert_and_get_id`, `update_by_id`,
//!   `delete_by_id`
//!
//! Rows returned by retrieval track loaded fields. The checked readers
//! (`RowState::try_get` and the generated `try_*` getters) report a field
//! the query did not select as [`RowError::FieldNotLoaded`](crate::RowError::FieldNotLoaded);
//! the plain getters read it as `None`.

mod mutate;
mod retrieve;
mod statements;

pub use mutate::RowMutationExt;
pub use retrieve::RowQueryExt;
pub use statements::{to_sql_insert, to_sql_update_by_id};
