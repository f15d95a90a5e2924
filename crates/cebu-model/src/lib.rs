//! Table model for survey extracts.
//!
//! A [`Table`] is an immutable, rectangular set of rows whose cells are
//! [`Value`]s. Each column carries a [`ColumnType`] inferred at load time.

pub mod error;
pub mod table;
pub mod value;

pub use error::{Result, TableError};
pub use table::{Field, Table, TableBuilder};
pub use value::{ColumnType, MISSING_MARKERS, Value, format_numeric, is_missing_marker};
