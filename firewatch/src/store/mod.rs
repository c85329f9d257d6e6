//! Record store: the three collections held in memory and persisted as one snapshot.
//!
//! Responsibilities:
//! - Own the snapshot behind a single reader/writer lock.
//! - Load it from, and rewrite it to, a pluggable [`SnapshotBackend`].
//! - Give repositories closure-scoped raw access to the collections.
//!
//! Every mutation persists the full snapshot before the write lock is
//! released. A failed persist restores the pre-mutation snapshot.

pub mod seed;
pub mod storage_file;
pub mod storage_memory;
pub mod types;

pub use seed::initialize_from_seed;
pub use storage_file::JsonFileBackend;
pub use storage_memory::InMemoryBackend;
pub use types::{Snapshot, SnapshotBackend};

use crate::error::{FirewatchError, FirewatchResult};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, info};

pub struct RecordStore {
    backend: Arc<dyn SnapshotBackend>,
    snapshot: RwLock<Snapshot>,
}

impl RecordStore {
    /// Store with empty collections; call [`RecordStore::load`] to fill it.
    pub fn new(backend: Arc<dyn SnapshotBackend>) -> Self {
        Self {
            backend,
            snapshot: RwLock::new(Snapshot::default()),
        }
    }

    /// Create a store and load its snapshot in one step.
    pub fn open(backend: Arc<dyn SnapshotBackend>) -> FirewatchResult<Self> {
        let store = Self::new(backend);
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory collections with the backend's snapshot.
    pub fn load(&self) -> FirewatchResult<()> {
        let loaded = self.backend.load()?;
        info!(
            "Loaded {} residents, {} coverage assignments, {} medical records from {}",
            loaded.residents.len(),
            loaded.coverage.len(),
            loaded.medical_records.len(),
            self.backend.describe()
        );
        *self.write_guard()? = loaded;
        Ok(())
    }

    /// Write the current collections to the backend.
    pub fn persist(&self) -> FirewatchResult<()> {
        let snapshot = self.read_guard()?;
        self.persist_snapshot(&snapshot)
    }

    /// Run `f` against the collections under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> FirewatchResult<R> {
        let snapshot = self.read_guard()?;
        Ok(f(&snapshot))
    }

    /// Run `f` against the collections under the write lock, then persist.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Snapshot) -> R) -> FirewatchResult<R> {
        let mut snapshot = self.write_guard()?;
        let before = snapshot.clone();
        let out = f(&mut snapshot);
        if let Err(e) = self.persist_snapshot(&snapshot) {
            *snapshot = before;
            return Err(e);
        }
        Ok(out)
    }

    /// Copy of the whole snapshot.
    pub fn snapshot(&self) -> FirewatchResult<Snapshot> {
        self.read(|s| s.clone())
    }

    fn persist_snapshot(&self, snapshot: &Snapshot) -> FirewatchResult<()> {
        match self.backend.persist(snapshot) {
            Ok(()) => {
                debug!("Saved snapshot to {}", self.backend.describe());
                Ok(())
            }
            Err(e) => {
                error!(
                    "Failed to save snapshot to {}: {}",
                    self.backend.describe(),
                    e
                );
                Err(e)
            }
        }
    }

    fn read_guard(&self) -> FirewatchResult<RwLockReadGuard<'_, Snapshot>> {
        self.snapshot
            .read()
            .map_err(|_| FirewatchError::storage("Failed to acquire read lock on record store"))
    }

    fn write_guard(&self) -> FirewatchResult<RwLockWriteGuard<'_, Snapshot>> {
        self.snapshot
            .write()
            .map_err(|_| FirewatchError::storage("Failed to acquire write lock on record store"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CoverageAssignment;

    #[test]
    fn test_load_replaces_previous_state() {
        let mut seeded = Snapshot::default();
        seeded.coverage.push(CoverageAssignment::new("1 Main St", 1));
        let backend = Arc::new(InMemoryBackend::with_snapshot(seeded));
        let store = RecordStore::open(backend.clone()).unwrap();
        assert_eq!(store.read(|s| s.coverage.len()).unwrap(), 1);

        // someone else rewrites the durable copy
        backend.persist(&Snapshot::default()).unwrap();
        store.load().unwrap();

        assert_eq!(store.read(|s| s.coverage.len()).unwrap(), 0);
    }

    #[test]
    fn test_mutate_persists_whole_snapshot() {
        let backend = Arc::new(InMemoryBackend::new());
        let store = RecordStore::open(backend.clone()).unwrap();

        store
            .mutate(|s| s.coverage.push(CoverageAssignment::new("1 Main St", 1)))
            .unwrap();

        assert_eq!(backend.persist_count(), 1);
        assert_eq!(backend.saved().unwrap().coverage.len(), 1);
    }

    #[test]
    fn test_failed_persist_rolls_back_memory() {
        let backend = Arc::new(InMemoryBackend::new());
        let store = RecordStore::open(backend.clone()).unwrap();
        backend.set_fail_persist(true);

        let err = store
            .mutate(|s| s.coverage.push(CoverageAssignment::new("1 Main St", 1)))
            .unwrap_err();

        assert!(matches!(err, FirewatchError::Storage(_)));
        assert_eq!(store.read(|s| s.coverage.len()).unwrap(), 0);
    }
}
