//! Column projection.

use std::collections::BTreeSet;

use cebu_model::{Table, TableError};
use tracing::debug;

use crate::error::Result;

/// Restricts `table` to `columns`, in the requested order.
///
/// Every row is kept, in order. Fails with `ColumnNotFound` naming the first
/// requested column absent from the table; only when every column exists is a
/// repeated request reported as `DuplicateColumn`.
pub fn project<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Table> {
    let indices = columns
        .iter()
        .map(|column| table.column_index(column.as_ref()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let mut seen = BTreeSet::new();
    for &idx in &indices {
        if !seen.insert(idx) {
            return Err(TableError::DuplicateColumn {
                column: table.fields()[idx].name.clone(),
                table: table.name().to_string(),
            }
            .into());
        }
    }

    let fields = indices
        .iter()
        .map(|&idx| table.fields()[idx].clone())
        .collect();
    let rows = table
        .rows()
        .iter()
        .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
        .collect();
    let projected = Table::try_new(table.name(), fields, rows)?;
    debug!(
        table = table.name(),
        columns_in = table.width(),
        columns_out = projected.width(),
        rows = projected.height(),
        "projected table"
    );
    Ok(projected)
}
