//! Seams between the loader and its collaborators.

use async_trait::async_trait;
use loader_core::ReviewRecord;
use review_generator::ReviewGenerator;
use std::convert::Infallible;

/// Source of records, called once per row while a batch is being filled.
///
/// Generation is synchronous and never fails.
pub trait RecordGenerator: Send {
    type Record: Send + Sync;

    fn next_record(&mut self) -> Self::Record;
}

impl RecordGenerator for ReviewGenerator {
    type Record = ReviewRecord;

    fn next_record(&mut self) -> ReviewRecord {
        ReviewGenerator::next_record(self)
    }
}

/// Destination that stores one batch of records per call.
///
/// The call is the loader's only suspension point. An implementation must
/// either store the whole batch or return an error.
#[async_trait]
pub trait BatchSink<R: Send + Sync>: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert `records` into `table`, returning the number of rows stored.
    async fn insert_batch(&mut self, table: &str, records: &[R]) -> Result<u64, Self::Error>;
}

/// Sink that accepts and drops every batch. Used for dry runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink {
    rows_seen: u64,
}

impl DiscardSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_seen(&self) -> u64 {
        self.rows_seen
    }
}

#[async_trait]
impl<R: Send + Sync> BatchSink<R> for DiscardSink {
    type Error = Infallible;

    async fn insert_batch(&mut self, _table: &str, records: &[R]) -> Result<u64, Infallible> {
        self.rows_seen += records.len() as u64;
        Ok(records.len() as u64)
    }
}
