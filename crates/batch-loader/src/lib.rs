//! Batched bulk loader.
//!
//! The [`BatchLoader`] pulls records from a [`RecordGenerator`], groups them
//! into batches laid out by a [`loader_core::BatchPlan`] and hands each batch
//! to a [`BatchSink`] as one insert. Only one batch is held in memory at a
//! time, batches are submitted strictly in index order, and a sink failure
//! stops the run with everything before it left in place.
//!
//! # Example
//!
//! ```ignore
//! use batch_loader::{BatchLoader, TracingProgress};
//! use loader_core::LoaderConfig;
//! use review_generator::ReviewGenerator;
//!
//! let config = LoaderConfig::default();
//! let loader = BatchLoader::from_config(&config)?;
//! let mut generator = ReviewGenerator::new(config.ranges, 42).unwrap();
//! let mut progress = TracingProgress::new(config.progress_every);
//!
//! let metrics = loader.load(&mut generator, &mut sink, &mut progress).await?;
//! ```

mod error;
mod loader;
mod metrics;
pub mod progress;
pub mod sink;

pub use error::LoadError;
pub use loader::BatchLoader;
pub use metrics::LoadMetrics;
pub use progress::{BatchProgress, NoopProgress, ProgressReporter, TracingProgress};
pub use sink::{BatchSink, DiscardSink, RecordGenerator};
pub use tokio_util::sync::CancellationToken;
