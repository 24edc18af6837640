//! Error types for the batch loader.

use loader_core::ConfigError;
use thiserror::Error;

/// Errors that end a load run.
///
/// Every variant raised after the loop started records how far the run got,
/// so a caller can audit or resume from the last completed batch.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Configuration was rejected before any batch was submitted.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The sink failed to store a batch.
    #[error(
        "Batch {batch_index} of {total_batches} failed after {completed_batches} completed batches ({rows_inserted} rows): {source}"
    )]
    Sink {
        batch_index: u64,
        total_batches: u64,
        completed_batches: u64,
        rows_inserted: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The run was cancelled between batches.
    #[error("Load cancelled after {completed_batches} completed batches ({rows_inserted} rows)")]
    Cancelled {
        completed_batches: u64,
        rows_inserted: u64,
    },
}

impl LoadError {
    /// Batches that were fully stored before the run ended.
    pub fn completed_batches(&self) -> u64 {
        match self {
            LoadError::Config(_) => 0,
            LoadError::Sink {
                completed_batches, ..
            }
            | LoadError::Cancelled {
                completed_batches, ..
            } => *completed_batches,
        }
    }

    /// Rows stored before the run ended.
    pub fn rows_inserted(&self) -> u64 {
        match self {
            LoadError::Config(_) => 0,
            LoadError::Sink { rows_inserted, .. } | LoadError::Cancelled { rows_inserted, .. } => {
                *rows_inserted
            }
        }
    }
}
