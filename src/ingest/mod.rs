//! Per-artist ingestion
//!
//! This module contains the storing half of the pipeline:
//! - the recrawl gate deciding skip vs. fetch from storage state
//! - the work provider seam and its HTTP implementation
//! - the ingest job itself: resolve identity, fetch works, serialize, store
//!
//! Every error here is scoped to a single artist. The worker pool treats an
//! `IngestError` as one failed outcome among many, never as a reason to stop
//! processing the remaining artists.

mod gate;
mod provider;
mod worker;

pub use gate::RecrawlGate;
pub use provider::{HttpWorkProvider, ProviderError, WorkProvider};
pub use worker::Ingestor;

use crate::catalog::FetchError;
use crate::storage::StorageError;
use thiserror::Error;

/// Failure of a single artist's ingestion
#[derive(Debug, Error)]
pub enum IngestError {
    /// The profile page was fetched but carried no extractable numeric id
    #[error("Could not resolve an artist id for {name} from {url}")]
    Resolution { name: String, url: String },

    /// The provider kept failing until the retry ceiling
    #[error("Provider failed for {name} after {attempts} attempts: {cause}")]
    Provider {
        name: String,
        attempts: u32,
        cause: String,
    },

    /// A profile-page fetch exhausted its retries
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The populated artist could not be serialized
    #[error("Serialization failed for {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The storage write or existence check failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}
