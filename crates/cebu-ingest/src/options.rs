//! Load configuration.

use std::collections::BTreeMap;

use cebu_model::ColumnType;

/// Field delimiter used by the survey extracts.
pub const TAB: u8 = b'\t';

/// How a delimited file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Single-byte field delimiter.
    pub delimiter: u8,
    /// Column types that bypass inference and are enforced on every row.
    pub column_types: BTreeMap<String, ColumnType>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: TAB,
            column_types: BTreeMap::new(),
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_column_type(mut self, column: impl Into<String>, ty: ColumnType) -> Self {
        self.column_types.insert(column.into(), ty);
        self
    }

    #[must_use]
    pub fn with_column_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnType)>,
        S: Into<String>,
    {
        self.column_types
            .extend(types.into_iter().map(|(name, ty)| (name.into(), ty)));
        self
    }

    pub fn declared_type(&self, column: &str) -> Option<ColumnType> {
        self.column_types.get(column).copied()
    }
}
