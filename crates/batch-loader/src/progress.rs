//! Progress notifications emitted after each stored batch.

use tracing::{debug, info};

/// One progress observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Zero-based index of the batch that was just stored.
    pub batch_index: u64,
    pub total_batches: u64,
    /// Rows stored by this batch.
    pub batch_rows: u64,
    /// Rows stored so far, this batch included.
    pub rows_inserted: u64,
}

impl BatchProgress {
    /// Batches fully stored, this one included.
    pub fn completed_batches(&self) -> u64 {
        self.batch_index + 1
    }

    pub fn percent(&self) -> f64 {
        if self.total_batches == 0 {
            100.0
        } else {
            self.completed_batches() as f64 * 100.0 / self.total_batches as f64
        }
    }
}

/// Receives progress observations. Fire-and-forget: the loader never looks
/// at what a reporter does with them.
pub trait ProgressReporter: Send {
    fn report(&mut self, progress: &BatchProgress);
}

impl<F> ProgressReporter for F
where
    F: FnMut(&BatchProgress) + Send,
{
    fn report(&mut self, progress: &BatchProgress) {
        (*self)(progress)
    }
}

/// Reporter that logs through `tracing`.
///
/// Every batch is logged at debug level; every `every`-th batch and the final
/// batch are logged at info level.
#[derive(Debug, Clone, Copy)]
pub struct TracingProgress {
    every: u64,
}

impl TracingProgress {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
        }
    }

    fn is_milestone(&self, progress: &BatchProgress) -> bool {
        let completed = progress.completed_batches();
        completed % self.every == 0 || completed == progress.total_batches
    }
}

impl Default for TracingProgress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressReporter for TracingProgress {
    fn report(&mut self, progress: &BatchProgress) {
        if self.is_milestone(progress) {
            info!(
                "Inserted batch {}/{} ({} rows total, {:.1}%)",
                progress.completed_batches(),
                progress.total_batches,
                progress.rows_inserted,
                progress.percent()
            );
        } else {
            debug!(
                "Inserted batch {}/{}: {} rows",
                progress.completed_batches(),
                progress.total_batches,
                progress.batch_rows
            );
        }
    }
}

/// Reporter that ignores every observation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&mut self, _progress: &BatchProgress) {}
}
