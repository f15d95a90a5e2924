use thiserror::Error;

use crate::ColumnType;

/// Schema and shape errors raised by table construction and table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("column '{column}' not found in {table}")]
    ColumnNotFound { column: String, table: String },

    #[error("column '{column}' appears more than once in {table}")]
    DuplicateColumn { column: String, table: String },

    #[error("row {row} of {table} has {found} values, expected {expected}")]
    RowWidth {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("key column '{column}' is {left} on the left but {right} on the right")]
    KeyTypeMismatch {
        column: String,
        left: ColumnType,
        right: ColumnType,
    },
}

pub type Result<T> = std::result::Result<T, TableError>;
