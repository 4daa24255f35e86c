//! Recrawl gate
//!
//! Decides, per artist, whether an expensive fetch-and-store is needed by
//! checking whether the artist's object already exists in storage. This is
//! what makes re-running the pipeline over the same artist list incremental:
//! only artists without a durable record get ingested again.

use crate::config::CheckErrorPolicy;
use crate::logsink::LogSender;
use crate::model::Artist;
use crate::storage::{ObjectStore, StorageError};
use std::sync::Arc;

/// Gate consulting storage existence before ingestion
pub struct RecrawlGate {
    store: Arc<dyn ObjectStore>,
    on_check_error: CheckErrorPolicy,
}

impl RecrawlGate {
    pub fn new(store: Arc<dyn ObjectStore>, on_check_error: CheckErrorPolicy) -> Self {
        Self {
            store,
            on_check_error,
        }
    }

    /// Returns whether this artist needs a fetch
    ///
    /// `Ok(false)` means the object is already present. A failed existence
    /// check is not "absent": under the default `Fail` policy it propagates
    /// as a `StorageError`; under `Fetch` the artist is treated as missing
    /// and the failure is logged at warn level.
    pub fn should_fetch(&self, artist: &Artist, log: &LogSender) -> Result<bool, StorageError> {
        let key = artist.storage_key();
        match self.store.exists(&key) {
            Ok(true) => {
                log.debug(format!("{} already present at {}, skipping", artist.name, key));
                Ok(false)
            }
            Ok(false) => {
                log.info(format!("{} missing at {}, will fetch", artist.name, key));
                Ok(true)
            }
            Err(e) => match self.on_check_error {
                CheckErrorPolicy::Fetch => {
                    log.warn(format!(
                        "existence check failed for {} ({}), treating as missing",
                        artist.name, e
                    ));
                    Ok(true)
                }
                CheckErrorPolicy::Fail => Err(e),
            },
        }
    }

    /// Filters an artist list down to the ones needing a fetch
    pub fn filter_missing(
        &self,
        artists: Vec<Artist>,
        log: &LogSender,
    ) -> Result<Vec<Artist>, StorageError> {
        let total = artists.len();
        let mut missing = Vec::with_capacity(total);
        for artist in artists {
            if self.should_fetch(&artist, log)? {
                missing.push(artist);
            }
        }
        log.info(format!(
            "recrawl gate: {} of {} artists need fetching",
            missing.len(),
            total
        ));
        Ok(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logsink::{LogAggregator, LogLevel};
    use crate::model::StorageKey;
    use crate::storage::{MemoryStore, StorageResult};

    /// Store whose existence checks always fail
    struct BrokenStore;

    impl ObjectStore for BrokenStore {
        fn exists(&self, key: &StorageKey) -> StorageResult<bool> {
            Err(StorageError::Check {
                key: key.object_path(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "backend down"),
            })
        }

        fn put(&self, _key: &StorageKey, _bytes: &[u8]) -> StorageResult<()> {
            Ok(())
        }
    }

    fn test_log() -> (LogAggregator, LogSender) {
        LogAggregator::start(Box::new(std::io::sink()), LogLevel::Debug)
    }

    fn artists(names: &[&str]) -> Vec<Artist> {
        names
            .iter()
            .map(|name| Artist::stub(*name, format!("https://example.com/artists/{}", name)))
            .collect()
    }

    #[tokio::test]
    async fn test_should_fetch_false_iff_stored() {
        let (aggregator, log) = test_log();
        let store = Arc::new(MemoryStore::new());

        let stored = Artist::stub("Stored", "https://example.com/artists/Stored");
        store.put(&stored.storage_key(), b"{}").unwrap();
        let missing = Artist::stub("Missing", "https://example.com/artists/Missing");

        let gate = RecrawlGate::new(store, CheckErrorPolicy::Fail);
        assert!(!gate.should_fetch(&stored, &log).unwrap());
        assert!(gate.should_fetch(&missing, &log).unwrap());

        drop(log);
        aggregator.stop().await;
    }

    #[tokio::test]
    async fn test_filter_missing_keeps_exactly_the_unstored() {
        let (aggregator, log) = test_log();
        let store = Arc::new(MemoryStore::new());

        let all = artists(&["A One", "B Two", "C Three", "D Four", "E Five"]);
        for artist in &all[..2] {
            store.put(&artist.storage_key(), b"{}").unwrap();
        }

        let gate = RecrawlGate::new(store, CheckErrorPolicy::Fail);
        let missing = gate.filter_missing(all, &log).unwrap();

        assert_eq!(missing.len(), 3);
        let names: Vec<&str> = missing.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["C Three", "D Four", "E Five"]);

        drop(log);
        aggregator.stop().await;
    }

    #[tokio::test]
    async fn test_check_error_propagates_under_fail_policy() {
        let (aggregator, log) = test_log();
        let gate = RecrawlGate::new(Arc::new(BrokenStore), CheckErrorPolicy::Fail);
        let artist = Artist::stub("Any", "https://example.com/artists/Any");

        let result = gate.should_fetch(&artist, &log);
        match result {
            Err(e @ StorageError::Check { .. }) => assert_eq!(e.key(), "a/Any.json"),
            other => panic!("expected check error, got {:?}", other),
        }

        drop(log);
        aggregator.stop().await;
    }

    #[tokio::test]
    async fn test_check_error_means_fetch_under_fetch_policy() {
        let (aggregator, log) = test_log();
        let gate = RecrawlGate::new(Arc::new(BrokenStore), CheckErrorPolicy::Fetch);
        let artist = Artist::stub("Any", "https://example.com/artists/Any");

        assert!(gate.should_fetch(&artist, &log).unwrap());

        drop(log);
        aggregator.stop().await;
    }
}
