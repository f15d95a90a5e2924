//! Survey extract ingestion.
//!
//! Loads delimited text files (tab-separated by default) into immutable
//! [`cebu_model::Table`]s. The first row is the header; column types are
//! inferred unless declared through [`LoadOptions`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cebu_ingest::{LoadOptions, load_table};
//! use cebu_model::ColumnType;
//!
//! let options = LoadOptions::default().with_column_type("basewman", ColumnType::Integer);
//! let births = load_table(Path::new("data/mbirth2.tab"), &options)?;
//! ```

mod error;
mod options;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use options::{LoadOptions, TAB};
pub use reader::{load_tab, load_table};
