use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when interacting with a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same key already exists in the collection.
    #[error("Duplicate key in {collection}: {key}")]
    DuplicateKey {
        collection: &'static str,
        key: String,
    },

    /// The store did not answer within the configured bound.
    #[error("Storage operation timed out after {0:?}")]
    Timeout(Duration),

    /// The store refused the operation (connection lost, read-only, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
