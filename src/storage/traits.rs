//! Storage trait and error types
//!
//! Defines the minimal blob-store interface the pipeline depends on and the
//! errors it can surface. An existence-check failure is deliberately distinct
//! from "object absent": the recrawl gate must never mistake a broken store
//! for a missing artist.

use crate::model::StorageKey;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Existence check failed for {key}: {source}")]
    Check {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Write failed for {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// The object key the failed operation was addressing
    pub fn key(&self) -> &str {
        match self {
            StorageError::Check { key, .. } | StorageError::Write { key, .. } => key,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for object storage backends
///
/// Implementations must be callable from concurrent worker tasks. The
/// pipeline only ever checks existence and overwrites whole objects; reads
/// are out of scope.
pub trait ObjectStore: Send + Sync {
    /// Returns whether an object exists at the given key
    ///
    /// `Ok(false)` means the object is genuinely absent. Backend failures
    /// must surface as `Err`, never as `Ok(false)`.
    fn exists(&self, key: &StorageKey) -> StorageResult<bool>;

    /// Writes the object at the given key, overwriting any existing content
    fn put(&self, key: &StorageKey, bytes: &[u8]) -> StorageResult<()>;
}
