//! Loader configuration and its validation.
//!
//! A [`LoaderConfig`] can be built in code or read from a YAML file:
//!
//! ```yaml
//! table: reviews
//! total_rows: 1000000
//! batch_size: 10000
//! batch_policy: clamped
//! seed: 42
//! ranges:
//!   max_product_id: 1000
//!   max_user_id: 100000
//! ```
//!
//! Unknown keys are rejected so a misspelt option never falls back to its
//! default silently.

use crate::plan::{BatchPlan, BatchPolicy};
use crate::record::{ReviewRanges, DEFAULT_COMMENT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default target table.
pub const DEFAULT_TABLE: &str = "reviews";

/// Default number of records per insert.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Largest accepted batch. PostgreSQL caps a statement at 65535 bind
/// parameters and every review row binds five.
pub const MAX_BATCH_SIZE: usize = 13_107;

/// Errors raised while reading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Batch size must be positive")]
    ZeroBatchSize,

    #[error("Batch size {batch_size} exceeds the maximum of {max}")]
    BatchSizeTooLarge { batch_size: usize, max: usize },

    #[error("Target table name must not be empty")]
    EmptyTableName,

    #[error("Invalid range for {field}: upper bound {value} must be at least 1")]
    InvalidRange { field: &'static str, value: i32 },

    #[error("{total_rows} rows in batches of {batch_size} overflows the fixed batch policy")]
    TotalRowsTooLarge { total_rows: u64, batch_size: usize },

    #[error("Unknown batch policy '{0}' (expected 'clamped' or 'fixed')")]
    InvalidBatchPolicy(String),
}

/// Everything the loader needs to know about one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Target table, optionally schema-qualified (`schema.table`).
    #[serde(default = "default_table")]
    pub table: String,

    /// Number of rows to write.
    #[serde(default = "default_total_rows")]
    pub total_rows: u64,

    /// Records per insert statement.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default)]
    pub batch_policy: BatchPolicy,

    /// Seed for the record generator. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Upper bounds for generated ids.
    #[serde(default)]
    pub ranges: ReviewRanges,

    #[serde(default = "default_comment")]
    pub comment: String,

    /// Log progress at info level every this many batches.
    #[serde(default = "default_progress_every")]
    pub progress_every: u64,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_total_rows() -> u64 {
    1_000_000
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_comment() -> String {
    DEFAULT_COMMENT.to_string()
}

fn default_progress_every() -> u64 {
    10
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            total_rows: default_total_rows(),
            batch_size: default_batch_size(),
            batch_policy: BatchPolicy::default(),
            seed: None,
            ranges: ReviewRanges::default(),
            comment: default_comment(),
            progress_every: default_progress_every(),
        }
    }
}

impl LoaderConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Validate every field and derive the batch plan.
    ///
    /// Nothing touches the sink until this has succeeded.
    pub fn validate(&self) -> Result<BatchPlan, ConfigError> {
        if self.table.trim().is_empty() {
            return Err(ConfigError::EmptyTableName);
        }
        self.ranges.validate()?;
        BatchPlan::new(self.total_rows, self.batch_size, self.batch_policy)
    }
}
