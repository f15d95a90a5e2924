//! Pipeline recipes: which files to read, which columns to keep, which rows
//! to filter, and the key that joins them.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cebu_model::{ColumnType, Value};
use serde::{Deserialize, Serialize};

/// Woman and barangay identifiers shared by every extract.
pub const SURVEY_KEY: [&str; 2] = ["basewman", "basebrgy"];

pub const BIRTH_FILE: &str = "mbirth2.tab";
pub const BASELINE_FILE: &str = "mbase2.tab";
pub const MEMBER_FILE: &str = "mhhmem2.tab";

/// Field delimiter of the source files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Tab,
    Comma,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Tab => b'\t',
            Self::Comma => b',',
        }
    }
}

/// Filter literal as written in a recipe file: a JSON number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Integer(v) => Value::Integer(*v),
            Self::Float(v) => Value::Float(*v),
            Self::Text(v) => Value::Text(v.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub column: String,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Label used in logs and summaries.
    pub name: String,
    /// Path relative to the data directory (absolute paths are used as is).
    pub file: PathBuf,
    /// Columns to keep, in output order.
    pub columns: Vec<String>,
    /// Equality filters, applied in order after projection.
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    /// Column types enforced at load time instead of inferred.
    #[serde(default)]
    pub column_types: BTreeMap<String, ColumnType>,
}

impl SourceSpec {
    fn new(name: &str, file: &str, columns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            file: PathBuf::from(file),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            filters: Vec::new(),
            column_types: BTreeMap::new(),
        }
    }

    fn with_filter(mut self, column: &str, value: Literal) -> Self {
        self.filters.push(FilterSpec {
            column: column.to_string(),
            value,
        });
        self
    }

    fn with_type(mut self, column: &str, ty: ColumnType) -> Self {
        self.column_types.insert(column.to_string(), ty);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub delimiter: Delimiter,
    pub key: Vec<String>,
    pub sources: Vec<SourceSpec>,
}

impl Recipe {
    /// Birth records joined with baseline live-birth counts.
    pub fn birth() -> Self {
        Self {
            name: "birth".to_string(),
            description: "Birth records joined with baseline live births".to_string(),
            delimiter: Delimiter::Tab,
            key: survey_key(),
            sources: vec![
                SourceSpec::new(
                    "births",
                    BIRTH_FILE,
                    &[
                        "basewman", "basebrgy", "WEIGHT1", "momweigt", "armcircu", "heightcm",
                        "SKINFLD1", "sexchild",
                    ],
                ),
                SourceSpec::new("baseline", BASELINE_FILE, &["basewman", "basebrgy", "livebrth"]),
            ],
        }
    }

    /// Birth and baseline records joined with the first-wave spouse
    /// (relationship code 30) from the household roster.
    pub fn household() -> Self {
        Self {
            name: "household".to_string(),
            description: "Birth and baseline records joined with the first-wave spouse"
                .to_string(),
            delimiter: Delimiter::Tab,
            key: survey_key(),
            sources: vec![
                SourceSpec::new(
                    "births",
                    BIRTH_FILE,
                    &[
                        "basewman", "basebrgy", "WEIGHT1", "momweigt", "armcircu", "SKINFLD1",
                        "sexchild",
                    ],
                ),
                SourceSpec::new(
                    "baseline",
                    BASELINE_FILE,
                    &[
                        "basewman", "basebrgy", "livebrth", "heightcm", "urbrural", "dlvrmnth",
                    ],
                ),
                SourceSpec::new(
                    "members",
                    MEMBER_FILE,
                    &["basewman", "basebrgy", "AGEPRW1", "wave", "RELNPRW1"],
                )
                .with_type("wave", ColumnType::Integer)
                .with_type("RELNPRW1", ColumnType::Integer)
                .with_filter("wave", Literal::Integer(0))
                .with_filter("RELNPRW1", Literal::Integer(30)),
            ],
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        builtin_recipes()
            .into_iter()
            .find(|recipe| recipe.name.eq_ignore_ascii_case(name))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read recipe: {}", path.display()))?;
        let recipe: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse recipe: {}", path.display()))?;
        recipe
            .validate()
            .with_context(|| format!("invalid recipe: {}", path.display()))?;
        Ok(recipe)
    }

    /// Checks the recipe is joinable before any file is read.
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            bail!("recipe '{}' has an empty join key", self.name);
        }
        if self.sources.is_empty() {
            bail!("recipe '{}' has no sources", self.name);
        }
        let mut names = BTreeSet::new();
        for source in &self.sources {
            if !names.insert(source.name.as_str()) {
                bail!("source '{}' is listed twice", source.name);
            }
            for column in &self.key {
                if !source.columns.contains(column) {
                    bail!(
                        "source '{}' does not keep key column '{column}'",
                        source.name
                    );
                }
            }
            for filter in &source.filters {
                if !source.columns.contains(&filter.column) {
                    bail!(
                        "source '{}' filters on '{}' which it does not keep",
                        source.name,
                        filter.column
                    );
                }
            }
        }
        Ok(())
    }
}

pub fn builtin_recipes() -> Vec<Recipe> {
    vec![Recipe::birth(), Recipe::household()]
}

fn survey_key() -> Vec<String> {
    SURVEY_KEY.iter().map(|c| (*c).to_string()).collect()
}
