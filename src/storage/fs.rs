//! Filesystem-backed object store
//!
//! Lays objects out as `<root>/<partition>/<name>.json`, mirroring the
//! bucket layout the pipeline expects from any blob store. Partition
//! directories are created on first write.

use crate::model::StorageKey;
use crate::storage::{ObjectStore, StorageError, StorageResult};
use std::path::{Path, PathBuf};

/// Object store rooted at a local directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at `root`
    ///
    /// The directory itself is created lazily on the first write, so opening
    /// a store for a pure existence-check pass touches nothing on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_file(&self, key: &StorageKey) -> PathBuf {
        self.root
            .join(key.partition().to_string())
            .join(format!("{}.json", key.name()))
    }
}

impl ObjectStore for FsStore {
    fn exists(&self, key: &StorageKey) -> StorageResult<bool> {
        self.object_file(key)
            .try_exists()
            .map_err(|source| StorageError::Check {
                key: key.object_path(),
                source,
            })
    }

    fn put(&self, key: &StorageKey, bytes: &[u8]) -> StorageResult<()> {
        let path = self.object_file(key);
        let write = |path: &Path| -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, bytes)
        };
        write(&path).map_err(|source| StorageError::Write {
            key: key.object_path(),
            source,
        })
    }
}
