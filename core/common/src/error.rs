//! Common error types for CredSync.

use thiserror::Error;

/// Top-level error type for CredSync operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A store file does not exist.
    #[error("Store not found: {0}")]
    NotFound(String),

    /// The credential table is missing or has no usable column structure.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Reading records from a store failed.
    #[error("Store read error: {0}")]
    Read(String),

    /// Writing records to a store failed.
    #[error("Store write error: {0}")]
    Write(String),

    /// Creating or copying a staged copy failed.
    #[error("Staging error: {0}")]
    Staging(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
