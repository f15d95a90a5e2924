//! Scalar cell values and column types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw field contents treated as missing when reading delimited text.
///
/// These are the conventional dataframe-reader defaults.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true when a raw field should be read as [`Value::Missing`].
///
/// Any spelling of NaN counts, so numeric parsing never produces a NaN cell.
pub fn is_missing_marker(raw: &str) -> bool {
    let trimmed = raw.trim();
    MISSING_MARKERS.contains(&trimmed) || is_nan_spelling(trimmed)
}

fn is_nan_spelling(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("nan")
}

/// Storage type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
        }
    }

    /// Parses a raw field as this type.
    ///
    /// Missing markers always yield [`Value::Missing`]. Returns `None` when the
    /// field is present but not representable as this type.
    pub fn parse(self, raw: &str) -> Option<Value> {
        if is_missing_marker(raw) {
            return Some(Value::Missing);
        }
        let trimmed = raw.trim();
        match self {
            Self::Integer => trimmed.parse::<i64>().ok().map(Value::Integer),
            Self::Float => trimmed.parse::<f64>().ok().map(Value::Float),
            Self::Text => Some(Value::Text(raw.to_string())),
        }
    }

    /// Narrowest type able to hold every raw field.
    ///
    /// Integer is preferred over float, float over text. A column with no
    /// present values is text.
    pub fn infer<'a, I>(raw_values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut inferred: Option<Self> = None;
        for raw in raw_values {
            if is_missing_marker(raw) {
                continue;
            }
            let trimmed = raw.trim();
            let candidate = if trimmed.parse::<i64>().is_ok() {
                Self::Integer
            } else if trimmed.parse::<f64>().is_ok() {
                Self::Float
            } else {
                return Self::Text;
            };
            inferred = Some(match (inferred, candidate) {
                (Some(Self::Float), _) | (_, Self::Float) => Self::Float,
                _ => Self::Integer,
            });
        }
        inferred.unwrap_or(Self::Text)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) | Self::Missing => None,
        }
    }

    /// Equality against a filter literal.
    ///
    /// Numbers compare numerically across integer and float, text compares
    /// exactly, and a missing value equals nothing.
    pub fn equals_literal(&self, literal: &Value) -> bool {
        match (self, literal) {
            (Self::Missing, _) | (_, Self::Missing) => false,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Text(_), _) | (_, Self::Text(_)) => false,
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_numeric(*v)),
            Self::Text(v) => f.write_str(v),
            Self::Missing => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// ```
/// use cebu_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(2.50), "2.5");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
