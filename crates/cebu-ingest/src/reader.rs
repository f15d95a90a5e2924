//! Delimited text reading with per-column type inference.

use std::fs::File;
use std::path::Path;

use cebu_model::{ColumnType, Field, Table};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::options::LoadOptions;

/// Reads a tab-delimited file with inferred column types.
pub fn load_tab(path: &Path) -> Result<Table> {
    load_table(path, &LoadOptions::default())
}

/// Reads a delimited file into an immutable [`Table`].
///
/// The first row names the columns. Every data row must have exactly as many
/// fields as the header; empty lines are skipped, but a line holding only
/// whitespace is a short row. Column types come from
/// `options` when declared, otherwise from [`ColumnType::infer`].
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<Table> {
    let file = open_source(path)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::from_csv(path, e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(|name| name.trim().is_empty()) {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    for column in options.column_types.keys() {
        if !headers.contains(column) {
            return Err(IngestError::UnknownDeclaredColumn {
                column: column.clone(),
                path: path.to_path_buf(),
            });
        }
    }

    let mut records: Vec<(u64, StringRecord)> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::from_csv(path, e))?;
        let line = record.position().map_or(0, csv::Position::line);
        if record.len() != headers.len() {
            return Err(IngestError::Parse {
                path: path.to_path_buf(),
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }
        records.push((line, record));
    }

    let fields: Vec<Field> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let ty = options.declared_type(name).unwrap_or_else(|| {
                ColumnType::infer(records.iter().map(|(_, record)| &record[idx]))
            });
            Field::new(name.as_str(), ty)
        })
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for (line, record) in &records {
        let mut row = Vec::with_capacity(fields.len());
        for (field, raw) in fields.iter().zip(record.iter()) {
            let value = field
                .ty
                .parse(raw)
                .ok_or_else(|| IngestError::TypeMismatch {
                    path: path.to_path_buf(),
                    line: *line,
                    column: field.name.clone(),
                    value: raw.to_string(),
                    expected: field.ty,
                })?;
            row.push(value);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        warn!(path = %path.display(), "source file has a header but no data rows");
    }
    let table = Table::try_new(table_name(path), fields, rows)?;
    debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "loaded source table"
    );
    Ok(table)
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

fn table_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
