//! Configuration for the cleaning steps.
//!
//! Every default here reproduces the customer dataset's business rules; the
//! structs exist so the same pipeline can run against similarly shaped data
//! with different column names.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_REQUIRED_COLUMN: &str = "gender";
pub const DEFAULT_PERCENTAGE_COLUMN: &str = "customer_lifetime_value";
pub const DEFAULT_IMPUTE_COLUMN: &str = "customer_lifetime_value";
pub const DEFAULT_IMPUTE_METHOD: &str = "median";
pub const DEFAULT_GENDER_COLUMN: &str = "gender";
pub const DEFAULT_COMPLAINTS_COLUMN: &str = "number_of_open_complaints";
pub const DEFAULT_INTEGER_COLUMN: &str = "income";

/// Statistic used to fill absent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImputeMethod {
    Mean,
    #[default]
    Median,
    /// Most frequent value; the smallest one when several tie.
    Mode,
}

impl ImputeMethod {
    /// Look up a method by its exact lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mean" => Some(Self::Mean),
            "median" => Some(Self::Median),
            "mode" => Some(Self::Mode),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
        }
    }
}

impl fmt::Display for ImputeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rename one known alternate identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

impl ColumnRename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Default for ColumnRename {
    fn default() -> Self {
        Self::new("st", "state")
    }
}

/// Imputation target and method name.
///
/// The method stays a raw name so an unrecognized value can be reported and
/// replaced with the median at run time instead of failing to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputeConfig {
    pub column: String,
    pub method: String,
}

impl ImputeConfig {
    pub fn new(column: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            method: method.into(),
        }
    }
}

impl Default for ImputeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_IMPUTE_COLUMN, DEFAULT_IMPUTE_METHOD)
    }
}

/// Raw value to canonical value lookup for one column. Misses pass through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalMapping {
    pub column: String,
    pub values: BTreeMap<String, String>,
}

impl CategoricalMapping {
    pub fn new<K, V>(column: impl Into<String>, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            column: column.into(),
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// State abbreviations expanded to full names.
    pub fn state() -> Self {
        Self::new(
            "state",
            [
                ("AZ", "Arizona"),
                ("Cali", "California"),
                ("WA", "Washington"),
            ],
        )
    }

    /// Education labels collapsed to one spelling.
    pub fn education() -> Self {
        Self::new("education", [("Bachelors", "Bachelor")])
    }

    /// Premium vehicle classes folded into `Luxury`.
    pub fn vehicle_class() -> Self {
        Self::new(
            "vehicle_class",
            [
                ("Sports Car", "Luxury"),
                ("Luxury SUV", "Luxury"),
                ("Luxury Car", "Luxury"),
            ],
        )
    }

    pub fn lookup(&self, raw: &str) -> Option<&str> {
        self.values.get(raw).map(String::as_str)
    }
}

/// Column names and lookup tables for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Lowercase identifiers and replace spaces before anything else runs.
    pub normalize_names: bool,
    /// Alternate identifier renamed after names are normalized.
    pub rename: ColumnRename,
    /// Rows with an absent value here are dropped.
    pub required_column: String,
    /// Column holding numbers or percentage strings.
    pub percentage_column: String,
    pub impute: ImputeConfig,
    pub gender_column: String,
    /// Applied in order.
    pub categorical: Vec<CategoricalMapping>,
    /// Column holding `a/b/c` complaint strings.
    pub complaints_column: String,
    /// Column cast to integers at the end of the run.
    pub integer_column: String,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            normalize_names: true,
            rename: ColumnRename::default(),
            required_column: DEFAULT_REQUIRED_COLUMN.to_string(),
            percentage_column: DEFAULT_PERCENTAGE_COLUMN.to_string(),
            impute: ImputeConfig::default(),
            gender_column: DEFAULT_GENDER_COLUMN.to_string(),
            categorical: vec![
                CategoricalMapping::state(),
                CategoricalMapping::education(),
                CategoricalMapping::vehicle_class(),
            ],
            complaints_column: DEFAULT_COMPLAINTS_COLUMN.to_string(),
            integer_column: DEFAULT_INTEGER_COLUMN.to_string(),
        }
    }
}

impl CleaningConfig {
    /// Override the imputation method name.
    #[must_use]
    pub fn with_impute_method(mut self, method: impl Into<String>) -> Self {
        self.impute.method = method.into();
        self
    }

    /// Replace the categorical mappings.
    #[must_use]
    pub fn with_categorical(mut self, mappings: Vec<CategoricalMapping>) -> Self {
        self.categorical = mappings;
        self
    }
}
