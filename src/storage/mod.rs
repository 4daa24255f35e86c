//! Object storage for harvested artist records
//!
//! The pipeline treats storage as an opaque key-value blob store: it checks
//! whether a key exists and overwrites objects wholesale, never reading them
//! back. Keys are derived from artist identity (`<partition>/<name>.json`),
//! so concurrent workers always write to distinct objects and no cross-key
//! locking is needed.

mod fs;
mod memory;
mod traits;

pub use fs::FsStore;
pub use memory::MemoryStore;
pub use traits::{ObjectStore, StorageError, StorageResult};
