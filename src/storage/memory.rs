//! In-memory object store
//!
//! Backs tests and dry runs with a plain map keyed by object path. Shares
//! the `ObjectStore` contract with the filesystem backend, including the
//! overwrite-on-put semantics.

use crate::model::StorageKey;
use crate::storage::{ObjectStore, StorageResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Object store holding everything in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently stored
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Returns the stored bytes for a key, if present
    pub fn get(&self, key: &StorageKey) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(&key.object_path()).cloned()
    }

    /// All object paths currently stored, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl ObjectStore for MemoryStore {
    fn exists(&self, key: &StorageKey) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(&key.object_path()))
    }

    fn put(&self, key: &StorageKey, bytes: &[u8]) -> StorageResult<()> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.object_path(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_exists() {
        let store = MemoryStore::new();
        let key = StorageKey::for_name("Oh No");

        assert!(!store.exists(&key).unwrap());
        store.put(&key, b"{}").unwrap();
        assert!(store.exists(&key).unwrap());
        assert_eq!(store.object_count(), 1);
    }

    #[test]
    fn test_overwrite_keeps_single_key() {
        let store = MemoryStore::new();
        let key = StorageKey::for_name("Oh No");

        store.put(&key, b"first").unwrap();
        store.put(&key, b"second").unwrap();

        assert_eq!(store.object_count(), 1);
        assert_eq!(store.get(&key).unwrap(), b"second");
    }
}
