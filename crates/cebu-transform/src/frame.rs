//! Conversion to Polars and delimited output.

use std::fs::File;
use std::path::Path;

use cebu_model::{ColumnType, Field, Table, Value};
use polars::prelude::{Column, CsvWriter, DataFrame, SerWriter};
use tracing::info;

use crate::error::{Result, TransformError};

/// Builds a Polars `DataFrame` with one typed column per table field.
///
/// Missing cells become nulls.
pub fn to_dataframe(table: &Table) -> Result<DataFrame> {
    let columns: Vec<Column> = table
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| build_column(table, idx, field))
        .collect();
    DataFrame::new(columns).map_err(Into::into)
}

fn build_column(table: &Table, idx: usize, field: &Field) -> Column {
    let cells = table.rows().iter().map(|row| &row[idx]);
    let name = field.name.as_str().into();
    match field.ty {
        ColumnType::Integer => {
            let values: Vec<Option<i64>> = cells
                .map(|value| match value {
                    Value::Integer(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Column::new(name, values)
        }
        ColumnType::Float => {
            let values: Vec<Option<f64>> = cells.map(Value::as_f64).collect();
            Column::new(name, values)
        }
        ColumnType::Text => {
            let values: Vec<Option<String>> = cells
                .map(|value| (!value.is_missing()).then(|| value.to_string()))
                .collect();
            Column::new(name, values)
        }
    }
}

/// Writes `table` as delimited text with a header row.
pub fn write_delimited(table: &Table, path: &Path, delimiter: u8) -> Result<()> {
    let mut df = to_dataframe(table)?;
    let mut file = File::create(path).map_err(|source| TransformError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(delimiter)
        .finish(&mut df)?;
    info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "wrote output table"
    );
    Ok(())
}
