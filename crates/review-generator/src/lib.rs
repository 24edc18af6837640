//! Record generator for the review-loader pipeline.
//!
//! This crate provides the [`ReviewGenerator`] which produces synthetic
//! review rows. Ids and ratings come from a seeded RNG so the same seed
//! reproduces the same sequence across runs; `created_at` is always the
//! wall-clock time the record was built.
//!
//! # Architecture
//!
//! ```text
//! ReviewRanges + comment + seed
//!        │
//!        ▼
//! ┌─────────────────┐
//! │ ReviewGenerator │
//! │                 │
//! │  - seed         │
//! │  - rng (StdRng) │
//! │  - index        │
//! └────────┬────────┘
//!          │
//!          ▼
//!    ReviewRecord { product_id, user_id, rating, comment, created_at }
//! ```
//!
//! # Example
//!
//! ```rust
//! use loader_core::ReviewRanges;
//! use review_generator::ReviewGenerator;
//!
//! let mut generator = ReviewGenerator::new(ReviewRanges::default(), 42).unwrap();
//! let record = generator.next_record();
//! assert!(record.is_within(&ReviewRanges::default()));
//! ```

pub mod generator;
pub mod numeric;

// Re-exports for convenience
pub use generator::{ReviewGenerator, ReviewIterator};
