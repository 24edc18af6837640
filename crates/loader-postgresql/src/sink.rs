//! PostgreSQL implementation of the batch sink.

use crate::error::PostgreSQLSinkError;
use crate::insert::{generate_count, generate_truncate_table, insert_batch};
use async_trait::async_trait;
use batch_loader::BatchSink;
use loader_core::ReviewRecord;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, info};

/// Sink that writes review batches to PostgreSQL.
///
/// The target table must already exist with columns compatible with
/// [`ReviewRecord::COLUMNS`].
pub struct PostgreSQLSink {
    client: Arc<Mutex<Client>>,
}

impl PostgreSQLSink {
    /// Connect to PostgreSQL.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - PostgreSQL connection string (e.g., "host=localhost user=postgres password=postgres dbname=testdb")
    pub async fn connect(connection_string: &str) -> Result<Self, PostgreSQLSinkError> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

        // Spawn the connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        // Test connection
        client.simple_query("SELECT 1").await?;
        debug!("PostgreSQL connection established");

        Ok(Self::with_client(Arc::new(Mutex::new(client))))
    }

    /// Create a sink over an existing client.
    pub fn with_client(client: Arc<Mutex<Client>>) -> Self {
        Self { client }
    }

    /// Truncate the table (delete all rows).
    pub async fn truncate_table(&self, table: &str) -> Result<(), PostgreSQLSinkError> {
        let sql = generate_truncate_table(table)?;
        let client = self.client.lock().await;
        info!("Truncating table: {}", table);
        client.execute(&sql, &[]).await?;
        Ok(())
    }

    /// Get the row count for a table.
    pub async fn row_count(&self, table: &str) -> Result<u64, PostgreSQLSinkError> {
        let sql = generate_count(table)?;
        let client = self.client.lock().await;
        let row = client.query_one(&sql, &[]).await?;
        let count: i64 = row.get(0);
        Ok(count as u64)
    }
}

#[async_trait]
impl BatchSink<ReviewRecord> for PostgreSQLSink {
    type Error = PostgreSQLSinkError;

    async fn insert_batch(
        &mut self,
        table: &str,
        records: &[ReviewRecord],
    ) -> Result<u64, PostgreSQLSinkError> {
        let client = self.client.lock().await;
        insert_batch(&client, table, records).await
    }
}
