//! The per-artist ingest job
//!
//! One invocation takes an artist from stub to stored record:
//! 1. resolve the numeric id from the profile page if it is not yet known
//! 2. fetch the artist's works from the provider, with bounded retry
//! 3. serialize the populated record
//! 4. write it to storage, overwriting any previous version
//! 5. release the works payload so a long run stays flat on memory
//!
//! A failure at any step leaves storage untouched for this artist; there is
//! no partial artifact to clean up on a rerun.

use crate::catalog::{extract_artist_id, Fetcher};
use crate::ingest::{IngestError, WorkProvider};
use crate::logsink::LogSender;
use crate::model::{Artist, Work};
use crate::storage::ObjectStore;
use std::sync::Arc;

/// Executes ingest jobs against shared collaborators
pub struct Ingestor {
    fetcher: Arc<Fetcher>,
    provider: Arc<dyn WorkProvider>,
    store: Arc<dyn ObjectStore>,
    provider_attempts: u32,
}

impl Ingestor {
    pub fn new(
        fetcher: Arc<Fetcher>,
        provider: Arc<dyn WorkProvider>,
        store: Arc<dyn ObjectStore>,
        provider_attempts: u32,
    ) -> Self {
        Self {
            fetcher,
            provider,
            store,
            provider_attempts,
        }
    }

    /// Ingests one artist; returns the number of works stored
    ///
    /// Re-running for the same artist is safe: the storage key is derived
    /// from identity, so the second run overwrites the first record with
    /// refreshed content.
    pub async fn ingest(
        &self,
        artist: &mut Artist,
        log: &LogSender,
    ) -> Result<usize, IngestError> {
        let artist_id = match artist.artist_id {
            Some(id) => id,
            None => {
                let html = self.fetcher.fetch(&artist.url, log).await?;
                let id = extract_artist_id(&html).ok_or_else(|| IngestError::Resolution {
                    name: artist.name.clone(),
                    url: artist.url.clone(),
                })?;
                log.debug(format!("resolved {} to artist id {}", artist.name, id));
                artist.artist_id = Some(id);
                id
            }
        };

        let works = self
            .fetch_works_with_retry(&artist.name, artist_id, log)
            .await?;
        let work_count = works.len();
        artist.works = works;

        let bytes = serde_json::to_vec(&*artist).map_err(|source| IngestError::Serialize {
            name: artist.name.clone(),
            source,
        })?;

        let key = artist.storage_key();
        self.store.put(&key, &bytes)?;

        artist.release_works();
        log.info(format!(
            "stored {} works for {} at {}",
            work_count, artist.name, key
        ));

        Ok(work_count)
    }

    /// Fetches works with the provider's own retry policy
    async fn fetch_works_with_retry(
        &self,
        name: &str,
        artist_id: u64,
        log: &LogSender,
    ) -> Result<Vec<Work>, IngestError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.provider.fetch_works(name, artist_id).await {
                Ok(works) => return Ok(works),
                Err(e) if attempt < self.provider_attempts => {
                    log.info(format!(
                        "provider retry for {}, on attempt {}: {}",
                        name, attempt, e
                    ));
                }
                Err(e) => {
                    log.error(format!(
                        "provider failed for {} after {} attempts: {}",
                        name, attempt, e
                    ));
                    return Err(IngestError::Provider {
                        name: name.to_string(),
                        attempts: attempt,
                        cause: e.message,
                    });
                }
            }
        }
    }
}
