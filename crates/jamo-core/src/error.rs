//! Core error types for jamo-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures are rejected before any state mutation; storage failures
//! propagate to the caller with no implicit retry.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for jamo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Session started with an empty catalog; no due-set fallback exists
    #[error("Catalog is empty: no characters available for review")]
    EmptyCatalog,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors.
///
/// Any failure in a [`crate::store::ProgressStore`] load or save surfaces
/// as one of these variants.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Store migration failed: {0}")]
    MigrationFailed(String),

    /// A persisted record could not be encoded or decoded
    #[error("Corrupt record for key '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// Store is locked by another writer
    #[error("Store is locked")]
    Locked,
}

/// Validation errors.
///
/// Rejected before any in-memory or persisted state changes.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Rating outside the 1..=5 scale
    #[error("Rating {rating} is out of range (expected 1..=5)")]
    RatingOutOfRange { rating: u8 },

    /// `rate` called while the card still shows its front face
    #[error("Card must be flipped before rating")]
    NotFlipped,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
