//! Store error types

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a record store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert hit an existing key
    #[error("{0}")]
    Duplicate(String),

    /// Snapshot file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot file is not valid record JSON
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A writer panicked while holding the table lock
    #[error("lock poisoned")]
    LockPoisoned,
}
