//! The generate-and-insert loop.

use crate::error::LoadError;
use crate::metrics::LoadMetrics;
use crate::progress::{BatchProgress, ProgressReporter};
use crate::sink::{BatchSink, RecordGenerator};
use loader_core::{BatchPlan, ConfigError, LoaderConfig};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Drives a record generator into a sink one batch at a time.
#[derive(Debug, Clone)]
pub struct BatchLoader {
    table: String,
    plan: BatchPlan,
    cancel: CancellationToken,
}

impl BatchLoader {
    /// Create a loader for an already validated plan.
    pub fn new(table: impl Into<String>, plan: BatchPlan) -> Result<Self, LoadError> {
        let table = table.into();
        if table.trim().is_empty() {
            return Err(ConfigError::EmptyTableName.into());
        }
        Ok(Self {
            table,
            plan,
            cancel: CancellationToken::new(),
        })
    }

    /// Validate `config` and create a loader from it.
    pub fn from_config(config: &LoaderConfig) -> Result<Self, LoadError> {
        let plan = config.validate()?;
        Self::new(config.table.clone(), plan)
    }

    /// Use `token` to stop the run. It is checked before each batch, never
    /// while an insert is in flight.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn plan(&self) -> &BatchPlan {
        &self.plan
    }

    /// Generate and store every batch of the plan.
    ///
    /// Batches are submitted in index order and batch `b + 1` starts only
    /// after batch `b` has been stored. At most one batch of records is
    /// alive at any time. A sink error aborts the run; earlier batches stay
    /// stored and the error reports how many completed.
    pub async fn load<G, S, P>(
        &self,
        generator: &mut G,
        sink: &mut S,
        progress: &mut P,
    ) -> Result<LoadMetrics, LoadError>
    where
        G: RecordGenerator,
        S: BatchSink<G::Record>,
        P: ProgressReporter + ?Sized,
    {
        let start_time = Instant::now();
        let mut metrics = LoadMetrics::default();
        let total_batches = self.plan.total_batches();

        info!(
            "Loading {} rows into '{}' ({} batches of up to {}, {} policy)",
            self.plan.total_rows(),
            self.table,
            total_batches,
            self.plan.batch_size(),
            self.plan.policy()
        );

        for batch_index in 0..total_batches {
            if self.cancel.is_cancelled() {
                warn!(
                    "Load cancelled before batch {}/{}",
                    batch_index + 1,
                    total_batches
                );
                return Err(LoadError::Cancelled {
                    completed_batches: metrics.batch_count,
                    rows_inserted: metrics.rows_inserted,
                });
            }

            let batch_len = self.plan.batch_len(batch_index);

            // Generate records
            let gen_start = Instant::now();
            let mut batch = Vec::with_capacity(batch_len);
            batch.extend((0..batch_len).map(|_| generator.next_record()));
            metrics.generation_duration += gen_start.elapsed();

            // Insert records
            let insert_start = Instant::now();
            let inserted = match sink.insert_batch(&self.table, &batch).await {
                Ok(inserted) => inserted,
                Err(e) => {
                    error!(
                        "Batch {}/{} failed after {} rows: {}",
                        batch_index + 1,
                        total_batches,
                        metrics.rows_inserted,
                        e
                    );
                    return Err(LoadError::Sink {
                        batch_index,
                        total_batches,
                        completed_batches: metrics.batch_count,
                        rows_inserted: metrics.rows_inserted,
                        source: Box::new(e),
                    });
                }
            };
            metrics.insert_duration += insert_start.elapsed();
            drop(batch);

            metrics.rows_inserted += inserted;
            metrics.batch_count += 1;

            progress.report(&BatchProgress {
                batch_index,
                total_batches,
                batch_rows: inserted,
                rows_inserted: metrics.rows_inserted,
            });
        }

        metrics.total_duration = start_time.elapsed();

        debug!(
            "Generation took {:?}, inserts took {:?}",
            metrics.generation_duration, metrics.insert_duration
        );
        info!(
            "Load complete: {} rows in {} batches in {:?} ({:.2} rows/sec)",
            metrics.rows_inserted,
            metrics.batch_count,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }
}
