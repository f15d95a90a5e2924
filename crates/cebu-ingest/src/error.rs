//! Error types for survey extract ingestion.

use std::path::{Path, PathBuf};

use cebu_model::{ColumnType, TableError};
use thiserror::Error;

/// Errors that can occur while loading a delimited source file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// A data row's field count differs from the header's.
    #[error("{path}, line {line}: expected {expected} fields, found {found}")]
    Parse {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Any other failure reported by the delimited-text reader.
    #[error("failed to parse {path}: {message}")]
    Csv { path: PathBuf, message: String },

    /// File has no header row.
    #[error("source file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// A value does not fit the type declared for its column.
    #[error("{path}, line {line}: value '{value}' in column '{column}' is not {expected}")]
    TypeMismatch {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
        expected: ColumnType,
    },

    /// A declared column type names a column missing from the header.
    #[error("declared column '{column}' not found in {path}")]
    UnknownDeclaredColumn { column: String, path: PathBuf },

    // === Table Errors ===
    #[error(transparent)]
    Table(#[from] TableError),
}

impl IngestError {
    pub(crate) fn from_csv(path: &Path, err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::FileRead {
                path: path.to_path_buf(),
                source,
            },
            _ => Self::Csv {
                path: path.to_path_buf(),
                message,
            },
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
