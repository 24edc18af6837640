//! Splitting a target row count into insert batches.

use crate::config::{ConfigError, MAX_BATCH_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decides how many rows the final batch carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// The last batch holds only the remainder, so exactly `total_rows` rows are written.
    #[default]
    Clamped,
    /// Every batch holds `batch_size` rows. The total may exceed `total_rows`
    /// by up to `batch_size - 1`.
    Fixed,
}

impl fmt::Display for BatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchPolicy::Clamped => write!(f, "clamped"),
            BatchPolicy::Fixed => write!(f, "fixed"),
        }
    }
}

impl FromStr for BatchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clamped" => Ok(BatchPolicy::Clamped),
            "fixed" => Ok(BatchPolicy::Fixed),
            other => Err(ConfigError::InvalidBatchPolicy(other.to_string())),
        }
    }
}

/// Validated batch layout for one load run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    total_rows: u64,
    batch_size: usize,
    policy: BatchPolicy,
    total_batches: u64,
}

impl BatchPlan {
    /// Build a plan, rejecting a zero or oversized batch size.
    ///
    /// A `total_rows` of zero is valid and yields a plan with no batches. Under
    /// [`BatchPolicy::Fixed`] the padded row total must fit in a `u64`.
    pub fn new(total_rows: u64, batch_size: usize, policy: BatchPolicy) -> Result<Self, ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::BatchSizeTooLarge {
                batch_size,
                max: MAX_BATCH_SIZE,
            });
        }

        let total_batches = total_rows.div_ceil(batch_size as u64);
        if policy == BatchPolicy::Fixed && total_batches.checked_mul(batch_size as u64).is_none() {
            return Err(ConfigError::TotalRowsTooLarge {
                total_rows,
                batch_size,
            });
        }

        Ok(Self {
            total_rows,
            batch_size,
            policy,
            total_batches,
        })
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    /// `ceil(total_rows / batch_size)`.
    pub fn total_batches(&self) -> u64 {
        self.total_batches
    }

    /// Number of records in the batch at `index`. Zero past the last batch.
    pub fn batch_len(&self, index: u64) -> usize {
        if index >= self.total_batches {
            return 0;
        }
        match self.policy {
            BatchPolicy::Fixed => self.batch_size,
            BatchPolicy::Clamped => {
                let start = index * self.batch_size as u64;
                std::cmp::min(self.batch_size as u64, self.total_rows - start) as usize
            }
        }
    }

    /// Rows the whole plan writes when every batch succeeds.
    pub fn rows_planned(&self) -> u64 {
        match self.policy {
            BatchPolicy::Clamped => self.total_rows,
            BatchPolicy::Fixed => self.total_batches * self.batch_size as u64,
        }
    }

    /// Iterate over the sizes of every batch in index order.
    pub fn batch_lens(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.total_batches).map(move |index| self.batch_len(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_batches_rounds_up() {
        let plan = BatchPlan::new(25, 10, BatchPolicy::Clamped).unwrap();
        assert_eq!(plan.total_batches(), 3);

        let plan = BatchPlan::new(30, 10, BatchPolicy::Clamped).unwrap();
        assert_eq!(plan.total_batches(), 3);

        let plan = BatchPlan::new(1, 10, BatchPolicy::Clamped).unwrap();
        assert_eq!(plan.total_batches(), 1);
    }

    #[test]
    fn test_clamped_final_batch() {
        let plan = BatchPlan::new(25, 10, BatchPolicy::Clamped).unwrap();
        assert_eq!(plan.batch_lens().collect::<Vec<_>>(), vec![10, 10, 5]);
        assert_eq!(plan.rows_planned(), 25);
    }

    #[test]
    fn test_fixed_final_batch_overshoots() {
        let plan = BatchPlan::new(25, 10, BatchPolicy::Fixed).unwrap();
        assert_eq!(plan.batch_lens().collect::<Vec<_>>(), vec![10, 10, 10]);
        assert_eq!(plan.rows_planned(), 30);
    }

    #[test]
    fn test_zero_rows_has_no_batches() {
        let plan = BatchPlan::new(0, 10, BatchPolicy::Fixed).unwrap();
        assert_eq!(plan.total_batches(), 0);
        assert_eq!(plan.batch_lens().count(), 0);
        assert_eq!(plan.rows_planned(), 0);
    }

    #[test]
    fn test_batch_len_past_end_is_zero() {
        let plan = BatchPlan::new(25, 10, BatchPolicy::Clamped).unwrap();
        assert_eq!(plan.batch_len(3), 0);
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let err = BatchPlan::new(10, 0, BatchPolicy::Clamped).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroBatchSize));
    }

    #[test]
    fn test_rejects_oversized_batch() {
        let err = BatchPlan::new(10, MAX_BATCH_SIZE + 1, BatchPolicy::Clamped).unwrap_err();
        assert!(matches!(err, ConfigError::BatchSizeTooLarge { .. }));
        assert!(BatchPlan::new(10, MAX_BATCH_SIZE, BatchPolicy::Clamped).is_ok());
    }

    #[test]
    fn test_fixed_policy_rejects_overflowing_total() {
        let err = BatchPlan::new(u64::MAX, 10, BatchPolicy::Fixed).unwrap_err();
        assert!(matches!(err, ConfigError::TotalRowsTooLarge { .. }));

        let plan = BatchPlan::new(u64::MAX, 10, BatchPolicy::Clamped).unwrap();
        assert_eq!(plan.rows_planned(), u64::MAX);
        assert_eq!(plan.batch_len(plan.total_batches() - 1), 5);

        let plan = BatchPlan::new(u64::MAX, 1, BatchPolicy::Fixed).unwrap();
        assert_eq!(plan.rows_planned(), u64::MAX);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("clamped".parse::<BatchPolicy>().unwrap(), BatchPolicy::Clamped);
        assert_eq!("FIXED".parse::<BatchPolicy>().unwrap(), BatchPolicy::Fixed);
        assert!("exact".parse::<BatchPolicy>().is_err());
        assert_eq!(BatchPolicy::Fixed.to_string(), "fixed");
    }
}
