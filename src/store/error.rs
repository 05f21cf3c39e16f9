//! Store error types

use thiserror::Error;

/// Errors that can occur reading tables
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend rejected or could not run the query (connectivity, auth, unknown table)
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
