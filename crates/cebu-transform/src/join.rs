//! Inner joins on a composite key.
//!
//! The right table is hashed on its key tuple, then the left table probes it
//! row by row. Output rows follow left row order, then right row order within
//! a key, and every pairing of duplicate keys is emitted.

use std::collections::{BTreeSet, HashMap};

use cebu_model::{Field, Table, TableError, Value};
use tracing::debug;

use crate::error::{Result, TransformError};

/// Suffixes applied to non-key columns present on both sides of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    pub left_suffix: String,
    pub right_suffix: String,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            left_suffix: "_x".to_string(),
            right_suffix: "_y".to_string(),
        }
    }
}

/// Hashable form of one key cell.
///
/// Integral floats fold onto integers so that `1` and `1.0` meet. Missing
/// cells match each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyPart {
    Integer(i64),
    Float(u64),
    Text(String),
    Missing,
}

impl KeyPart {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Integer(v) => Self::Integer(*v),
            Value::Float(v) if v.is_nan() => Self::Missing,
            Value::Float(v) => {
                if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v < i64::MAX as f64 {
                    Self::Integer(*v as i64)
                } else {
                    Self::Float(v.to_bits())
                }
            }
            Value::Text(v) => Self::Text(v.clone()),
            Value::Missing => Self::Missing,
        }
    }
}

fn key_of(row: &[Value], indices: &[usize]) -> Vec<KeyPart> {
    indices
        .iter()
        .map(|&idx| KeyPart::from_value(&row[idx]))
        .collect()
}

/// Inner join of `left` and `right` on `key`, with default suffixes.
pub fn join_on<S: AsRef<str>>(left: &Table, right: &Table, key: &[S]) -> Result<Table> {
    join_on_with(left, right, key, &JoinOptions::default())
}

/// Inner join of `left` and `right` on `key`.
///
/// Output columns are the left columns followed by the right non-key columns.
pub fn join_on_with<S: AsRef<str>>(
    left: &Table,
    right: &Table,
    key: &[S],
    options: &JoinOptions,
) -> Result<Table> {
    if key.is_empty() {
        return Err(TransformError::EmptyKey);
    }
    let mut left_key = Vec::with_capacity(key.len());
    let mut right_key = Vec::with_capacity(key.len());
    for column in key {
        let column = column.as_ref();
        let l = left.column_index(column)?;
        let r = right.column_index(column)?;
        let (lt, rt) = (left.fields()[l].ty, right.fields()[r].ty);
        if lt.is_numeric() != rt.is_numeric() {
            return Err(TableError::KeyTypeMismatch {
                column: column.to_string(),
                left: lt,
                right: rt,
            }
            .into());
        }
        left_key.push(l);
        right_key.push(r);
    }

    let right_payload: Vec<usize> = (0..right.width())
        .filter(|idx| !right_key.contains(idx))
        .collect();
    let fields = output_fields(left, right, &left_key, &right_payload, options);

    let mut index: HashMap<Vec<KeyPart>, Vec<usize>> = HashMap::new();
    for (row_idx, row) in right.rows().iter().enumerate() {
        index.entry(key_of(row, &right_key)).or_default().push(row_idx);
    }

    let mut rows = Vec::new();
    let mut unmatched_left = 0usize;
    let mut matched_right = BTreeSet::new();
    for left_row in left.rows() {
        let Some(matches) = index.get(&key_of(left_row, &left_key)) else {
            unmatched_left += 1;
            continue;
        };
        for &right_idx in matches {
            matched_right.insert(right_idx);
            let right_row = &right.rows()[right_idx];
            let mut row = Vec::with_capacity(fields.len());
            row.extend(left_row.iter().cloned());
            row.extend(right_payload.iter().map(|&idx| right_row[idx].clone()));
            rows.push(row);
        }
    }

    let joined = Table::try_new(format!("{} + {}", left.name(), right.name()), fields, rows)?;
    debug!(
        left = left.name(),
        right = right.name(),
        left_rows = left.height(),
        right_rows = right.height(),
        rows_out = joined.height(),
        unmatched_left,
        unmatched_right = right.height() - matched_right.len(),
        "joined tables"
    );
    Ok(joined)
}

/// Folds [`join_on`] over `tables` from left to right.
///
/// Callers that need the row count after each step fold [`join_on`] themselves.
pub fn join_all<S: AsRef<str>>(tables: &[Table], key: &[S]) -> Result<Table> {
    let (first, rest) = tables.split_first().ok_or(TransformError::NoTables)?;
    rest.iter()
        .try_fold(first.clone(), |acc, table| join_on(&acc, table, key))
}

fn output_fields(
    left: &Table,
    right: &Table,
    left_key: &[usize],
    right_payload: &[usize],
    options: &JoinOptions,
) -> Vec<Field> {
    let left_payload: BTreeSet<&str> = left
        .fields()
        .iter()
        .enumerate()
        .filter(|(idx, _)| !left_key.contains(idx))
        .map(|(_, field)| field.name.as_str())
        .collect();
    let right_names: BTreeSet<&str> = right_payload
        .iter()
        .map(|&idx| right.fields()[idx].name.as_str())
        .collect();

    let mut fields: Vec<Field> = left
        .fields()
        .iter()
        .map(|field| {
            if left_payload.contains(field.name.as_str())
                && right_names.contains(field.name.as_str())
            {
                Field::new(format!("{}{}", field.name, options.left_suffix), field.ty)
            } else {
                field.clone()
            }
        })
        .collect();
    fields.extend(right_payload.iter().map(|&idx| {
        let field = &right.fields()[idx];
        if left_payload.contains(field.name.as_str()) {
            Field::new(format!("{}{}", field.name, options.right_suffix), field.ty)
        } else {
            field.clone()
        }
    }));
    fields
}
