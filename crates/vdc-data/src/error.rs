//! Store error types.

use thiserror::Error;

/// Errors surfaced by the hosted table store and auth collaborators.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row matched where one was required.
    #[error("Row not found in {table}")]
    RowNotFound { table: String },

    /// The store rejected or failed the operation.
    #[error("Store operation failed: {0}")]
    Query(String),

    /// Connection-level failure (network, timeout).
    #[error("Connection error: {0}")]
    Connection(String),

    /// A row could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A row is missing an expected column or has the wrong type.
    #[error("Malformed row in {table}: {detail}")]
    MalformedRow { table: String, detail: String },
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
