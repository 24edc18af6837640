//! Metrics collected over one load run.

use std::time::Duration;

/// Metrics from a load operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadMetrics {
    /// Number of rows the sink reported as inserted.
    pub rows_inserted: u64,
    /// Number of batches submitted successfully.
    pub batch_count: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating records.
    pub generation_duration: Duration,
    /// Time spent waiting on the sink.
    pub insert_duration: Duration,
}

impl LoadMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_per_second() {
        let metrics = LoadMetrics {
            rows_inserted: 1000,
            batch_count: 10,
            total_duration: Duration::from_secs(10),
            generation_duration: Duration::from_secs(2),
            insert_duration: Duration::from_secs(8),
        };

        assert_eq!(metrics.rows_per_second(), 100.0);
    }

    #[test]
    fn test_rows_per_second_zero_duration() {
        let metrics = LoadMetrics {
            rows_inserted: 10,
            ..Default::default()
        };
        assert_eq!(metrics.rows_per_second(), 0.0);
    }
}
