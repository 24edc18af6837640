//! Review record and the value ranges it is generated from.

use crate::config::ConfigError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest rating a review can carry.
pub const RATING_MIN: i32 = 1;

/// Highest rating a review can carry.
pub const RATING_MAX: i32 = 5;

/// Placeholder text written into every generated review.
pub const DEFAULT_COMMENT: &str = "This is a sample review comment.";

/// One synthetic row of the reviews table.
///
/// Records are built once by a generator, buffered for a single batch and
/// then dropped. Nothing reads them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub product_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewRecord {
    /// Column names in the order values are bound on insert.
    pub const COLUMNS: [&'static str; 5] =
        ["product_id", "user_id", "rating", "comment", "created_at"];

    /// Check the record against the ranges it should have been drawn from.
    pub fn is_within(&self, ranges: &ReviewRanges) -> bool {
        (1..=ranges.max_product_id).contains(&self.product_id)
            && (1..=ranges.max_user_id).contains(&self.user_id)
            && (RATING_MIN..=RATING_MAX).contains(&self.rating)
    }
}

/// Closed upper bounds for the randomly drawn ids. Lower bounds are always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewRanges {
    #[serde(default = "default_max_product_id")]
    pub max_product_id: i32,
    #[serde(default = "default_max_user_id")]
    pub max_user_id: i32,
}

fn default_max_product_id() -> i32 {
    1_000
}

fn default_max_user_id() -> i32 {
    100_000
}

impl ReviewRanges {
    /// Reject upper bounds below 1, which would leave nothing to draw from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_product_id < 1 {
            return Err(ConfigError::InvalidRange {
                field: "max_product_id",
                value: self.max_product_id,
            });
        }
        if self.max_user_id < 1 {
            return Err(ConfigError::InvalidRange {
                field: "max_user_id",
                value: self.max_user_id,
            });
        }
        Ok(())
    }
}

impl Default for ReviewRanges {
    fn default() -> Self {
        Self {
            max_product_id: default_max_product_id(),
            max_user_id: default_max_user_id(),
        }
    }
}
