//! Row filtering by equality against a literal.

use cebu_model::{Table, Value};
use tracing::debug;

use crate::error::Result;

/// Keeps the rows whose `column` equals `literal`.
///
/// Comparison follows [`Value::equals_literal`]: numeric across integer and
/// float, exact for text, and never true for missing cells.
pub fn filter_equals(table: &Table, column: &str, literal: &Value) -> Result<Table> {
    let idx = table.column_index(column)?;
    let rows: Vec<_> = table
        .rows()
        .iter()
        .filter(|row| row[idx].equals_literal(literal))
        .cloned()
        .collect();
    let filtered = Table::try_new(table.name(), table.fields().to_vec(), rows)?;
    debug!(
        table = table.name(),
        column,
        value = %literal,
        rows_in = table.height(),
        rows_out = filtered.height(),
        "filtered table"
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cebu_model::ColumnType;

    #[test]
    fn keeps_matching_rows_in_order() {
        let table = Table::builder("mhhmem2.tab")
            .column("basewman", ColumnType::Integer)
            .column("wave", ColumnType::Integer)
            .row([1_i64, 0])
            .row([1_i64, 1])
            .row([2_i64, 0])
            .build()
            .unwrap();

        let filtered = filter_equals(&table, "wave", &Value::Integer(0)).unwrap();

        assert_eq!(filtered.height(), 2);
        assert_eq!(filtered.rows()[0][0], Value::Integer(1));
        assert_eq!(filtered.rows()[1][0], Value::Integer(2));
        assert_eq!(table.height(), 3);
    }

    #[test]
    fn float_column_matches_integer_literal() {
        let table = Table::builder("t")
            .column("x", ColumnType::Float)
            .row([30.0_f64])
            .row([30.5_f64])
            .build()
            .unwrap();

        let filtered = filter_equals(&table, "x", &Value::Integer(30)).unwrap();

        assert_eq!(filtered.height(), 1);
    }

    #[test]
    fn unknown_column_fails() {
        let table = Table::builder("t")
            .column("x", ColumnType::Text)
            .build()
            .unwrap();

        assert!(filter_equals(&table, "wave", &Value::Integer(0)).is_err());
    }
}
