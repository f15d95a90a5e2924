#![deny(unsafe_code)]

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::{ColumnType, Value};

/// Name and storage type of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: ColumnType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// An immutable rectangular table.
///
/// Every row holds exactly one value per field, in field order. Column names
/// are unique. Operations never mutate a table; they build a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    fields: Vec<Field>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Builds a table, checking column uniqueness and row width.
    pub fn try_new(
        name: impl Into<String>,
        fields: Vec<Field>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        let name = name.into();
        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    column: field.name.clone(),
                    table: name,
                });
            }
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != fields.len() {
                return Err(TableError::RowWidth {
                    table: name,
                    row,
                    expected: fields.len(),
                    found: values.len(),
                });
            }
        }
        Ok(Self { name, fields, rows })
    }

    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder {
            name: name.into(),
            fields: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Human-readable origin, usually the source file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.fields.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    /// Position of a column, or `ColumnNotFound` naming this table.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| TableError::ColumnNotFound {
                column: name.to_string(),
                table: self.name.clone(),
            })
    }

    pub fn field(&self, name: &str) -> Result<&Field> {
        self.column_index(name).map(|idx| &self.fields[idx])
    }

    /// Values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn value(&self, row: usize, column: &str) -> Result<Option<&Value>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.get(row).map(|values| &values[idx]))
    }
}

/// Incremental construction of a [`Table`], mostly for fixtures.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    name: String,
    fields: Vec<Field>,
    rows: Vec<Vec<Value>>,
}

impl TableBuilder {
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, ty: ColumnType) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    #[must_use]
    pub fn row<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rows.push(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<Table> {
        Table::try_new(self.name, self.fields, self.rows)
    }
}
