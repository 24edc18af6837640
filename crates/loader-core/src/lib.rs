//! Core types for the review-loader framework.
//!
//! This crate provides the foundational types shared by the generator,
//! the batch loader and the storage sinks:
//!
//! - [`ReviewRecord`] - One synthetic review row
//! - [`ReviewRanges`] - Closed value ranges used when generating reviews
//! - [`BatchPlan`] - How a target row count splits into batches
//! - [`LoaderConfig`] - Loader configuration, loadable from YAML
//!
//! # Architecture
//!
//! ```text
//! loader-core (this crate)
//!    │
//!    ├─── review-generator   (produces ReviewRecord values)
//!    ├─── batch-loader       (drives BatchPlan against a sink)
//!    └─── loader-postgresql  (writes ReviewRecord batches to PostgreSQL)
//! ```
//!
//! # Example
//!
//! ```rust
//! use loader_core::{BatchPlan, BatchPolicy};
//!
//! let plan = BatchPlan::new(25, 10, BatchPolicy::Clamped).unwrap();
//! assert_eq!(plan.total_batches(), 3);
//! assert_eq!(plan.batch_len(2), 5);
//! ```

pub mod config;
pub mod plan;
pub mod record;

// Re-exports for convenience
pub use config::{ConfigError, LoaderConfig, DEFAULT_BATCH_SIZE, DEFAULT_TABLE, MAX_BATCH_SIZE};
pub use plan::{BatchPlan, BatchPolicy};
pub use record::{ReviewRanges, ReviewRecord, DEFAULT_COMMENT, RATING_MAX, RATING_MIN};
