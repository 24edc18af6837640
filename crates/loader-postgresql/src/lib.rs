//! PostgreSQL storage sink for the review loader.
//!
//! This crate writes batches of [`loader_core::ReviewRecord`] into an
//! existing PostgreSQL table with one multi-row `INSERT` per batch. Creating
//! the table, its partitions and indexes is left to the database's own setup
//! scripts.
//!
//! # Example
//!
//! ```ignore
//! use batch_loader::{BatchLoader, TracingProgress};
//! use loader_postgresql::PostgreSQLSink;
//!
//! let mut sink = PostgreSQLSink::connect("host=localhost user=postgres dbname=reviews").await?;
//! let metrics = loader.load(&mut generator, &mut sink, &mut TracingProgress::default()).await?;
//! println!("{} rows now in table", sink.row_count("reviews").await?);
//! ```

pub mod args;
mod error;
pub mod insert;
mod sink;

pub use args::{CommonLoadArgs, PostgreSQLCountArgs, PostgreSQLLoadArgs};
pub use error::PostgreSQLSinkError;
pub use sink::PostgreSQLSink;
