//! Table Schema
//!
//! The phenotypic table is addressed by column name. Four core columns
//! (identifier, age at scan, mean FD, percent FD) must exist and are
//! resolved once when the table is loaded; every other column is kept as
//! raw text and parsed on demand.

use crate::error::{DataError, Result};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Name of the derived whole-years age column added by [`clean`](crate::clean)
pub const AGE_YEARS_COLUMN: &str = "AGE_YRS";

/// Column names and parsing rules for the phenotypic table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Participant / connectivity file identifier
    #[serde(default = "default_id_column")]
    pub id_column: String,
    /// Continuous age at scan
    #[serde(default = "default_age_column")]
    pub age_column: String,
    /// Mean framewise displacement
    #[serde(default = "default_mean_fd_column")]
    pub mean_fd_column: String,
    /// Percentage of frames above the FD threshold (primary motion measure)
    #[serde(default = "default_perc_fd_column")]
    pub perc_fd_column: String,
    /// Identifier value meaning "no file available"
    #[serde(default = "default_missing_id")]
    pub missing_id_sentinel: String,
    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Cell values treated as missing
    #[serde(default = "default_null_tokens")]
    pub null_tokens: Vec<String>,
    /// Youngest whole-year age kept by `clean` (inclusive)
    #[serde(default = "default_clean_age_lower")]
    pub clean_age_lower: i32,
    /// Oldest whole-year age kept by `clean` (inclusive)
    #[serde(default = "default_clean_age_upper")]
    pub clean_age_upper: i32,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            id_column: default_id_column(),
            age_column: default_age_column(),
            mean_fd_column: default_mean_fd_column(),
            perc_fd_column: default_perc_fd_column(),
            missing_id_sentinel: default_missing_id(),
            delimiter: default_delimiter(),
            null_tokens: default_null_tokens(),
            clean_age_lower: default_clean_age_lower(),
            clean_age_upper: default_clean_age_upper(),
        }
    }
}

fn default_id_column() -> String {
    "FILE_ID".to_string()
}
fn default_age_column() -> String {
    "AGE_AT_SCAN".to_string()
}
fn default_mean_fd_column() -> String {
    "func_mean_fd".to_string()
}
fn default_perc_fd_column() -> String {
    "func_perc_fd".to_string()
}
fn default_missing_id() -> String {
    "no_filename".to_string()
}
fn default_delimiter() -> char {
    ','
}
fn default_null_tokens() -> Vec<String> {
    [
        "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "NULL", "null", "None", "#N/A",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_clean_age_lower() -> i32 {
    6
}
fn default_clean_age_upper() -> i32 {
    18
}

impl SchemaConfig {
    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(DataError::InvalidDelimiter(self.delimiter))
        }
    }

    /// Whether a raw cell counts as missing
    pub fn is_null(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        self.null_tokens.iter().any(|t| t == trimmed)
    }
}

/// Validated column layout of a loaded table
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<String>,
    index: FxHashMap<String, usize>,
    config: SchemaConfig,
}

impl Schema {
    /// Build a schema from header names, checking that every core column exists
    pub fn new(columns: Vec<String>, config: SchemaConfig) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(DataError::DuplicateColumn(name.clone()));
            }
        }

        let schema = Self {
            columns,
            index,
            config,
        };
        for core in [
            &schema.config.id_column,
            &schema.config.age_column,
            &schema.config.mean_fd_column,
            &schema.config.perc_fd_column,
        ] {
            schema.position(core)?;
        }

        Ok(schema)
    }

    /// Source column names in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a source column
    pub fn position(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    /// Whether the source table has this column
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Parsing and naming rules this schema was built with
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Parse a raw cell into an optional number
    ///
    /// Null tokens and NaN become `None`; anything else that is not a number
    /// is a [`DataError::Parse`].
    pub fn parse_cell(&self, row: usize, column: &str, raw: &str) -> Result<Option<f64>> {
        if self.config.is_null(raw) {
            return Ok(None);
        }
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_nan() => Ok(None),
            Ok(v) => Ok(Some(v)),
            Err(_) => Err(DataError::Parse {
                row,
                column: column.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

/// Motion measure used to threshold participants
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionMeasure {
    /// Percentage of frames above the FD threshold (`func_perc_fd`)
    #[default]
    PercentFd,
    /// Mean framewise displacement (`func_mean_fd`)
    MeanFd,
    /// Any other numeric column
    Column(String),
}

impl MotionMeasure {
    /// Column holding this measure under the given schema
    pub fn column_name<'a>(&'a self, config: &'a SchemaConfig) -> &'a str {
        match self {
            MotionMeasure::PercentFd => &config.perc_fd_column,
            MotionMeasure::MeanFd => &config.mean_fd_column,
            MotionMeasure::Column(name) => name,
        }
    }
}

impl std::str::FromStr for MotionMeasure {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "perc" | "percent" | "perc-fd" | "func_perc_fd" => MotionMeasure::PercentFd,
            "mean" | "mean-fd" | "func_mean_fd" => MotionMeasure::MeanFd,
            other => MotionMeasure::Column(other.to_string()),
        })
    }
}

impl std::fmt::Display for MotionMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MotionMeasure::PercentFd => write!(f, "percent FD"),
            MotionMeasure::MeanFd => write!(f, "mean FD"),
            MotionMeasure::Column(name) => write!(f, "{}", name),
        }
    }
}
