//! Error types.
//!
//! Backend failures propagate unchanged to the caller; the engine performs no
//! retry, backoff, or translation into transport-level errors. Removing a
//! file or directory that does not exist is not an error (the entry is simply
//! omitted from the result).

use thiserror::Error;

/// Failure reported by a storage backend implementation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend has no object at the given key.
    #[error("object not found: {0}")]
    NotFound(String),

    /// Underlying I/O failure.
    #[error("backend I/O failure")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure with an opaque cause.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Top-level error for engine operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("configuration error: {0}")]
    Config(String),
}
