//! Error types for the PostgreSQL sink.

use thiserror::Error;

/// Errors that can occur while writing to PostgreSQL.
#[derive(Error, Debug)]
pub enum PostgreSQLSinkError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Table name that cannot be quoted as an identifier.
    #[error("Invalid table name '{0}'")]
    InvalidTableName(String),

    /// Batch would bind more parameters than one statement accepts.
    #[error("Batch of {rows} rows needs {params} bind parameters, more than the limit of {max}")]
    TooManyParameters {
        rows: usize,
        params: usize,
        max: usize,
    },
}
