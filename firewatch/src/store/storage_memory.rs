//! In-memory snapshot backend
//!
//! Keeps the last persisted snapshot in memory. Used by tests and as a fake
//! for callers that do not want a file on disk.

use super::types::{Snapshot, SnapshotBackend};
use crate::error::{FirewatchError, FirewatchResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct InMemoryBackend {
    saved: Mutex<Snapshot>,
    fail_persist: AtomicBool,
    persist_count: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::default())
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: Mutex::new(snapshot),
            fail_persist: AtomicBool::new(false),
            persist_count: AtomicUsize::new(0),
        }
    }

    /// Make every following `persist` fail with a storage error.
    pub fn set_fail_persist(&self, fail: bool) {
        self.fail_persist.store(fail, Ordering::SeqCst);
    }

    /// Number of successful persists so far.
    pub fn persist_count(&self) -> usize {
        self.persist_count.load(Ordering::SeqCst)
    }

    /// Copy of the last persisted snapshot.
    pub fn saved(&self) -> FirewatchResult<Snapshot> {
        self.saved
            .lock()
            .map(|s| s.clone())
            .map_err(|_| FirewatchError::storage("in-memory backend lock poisoned"))
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBackend for InMemoryBackend {
    fn load(&self) -> FirewatchResult<Snapshot> {
        self.saved()
    }

    fn persist(&self, snapshot: &Snapshot) -> FirewatchResult<()> {
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(FirewatchError::storage("simulated persist failure"));
        }
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| FirewatchError::storage("in-memory backend lock poisoned"))?;
        *saved = snapshot.clone();
        self.persist_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CoverageAssignment;

    #[test]
    fn test_persist_then_load() {
        let backend = InMemoryBackend::new();
        let mut snap = Snapshot::default();
        snap.coverage.push(CoverageAssignment::new("1 Main St", 1));

        backend.persist(&snap).unwrap();
        assert_eq!(backend.load().unwrap(), snap);
        assert_eq!(backend.persist_count(), 1);
    }

    #[test]
    fn test_simulated_failure() {
        let backend = InMemoryBackend::new();
        backend.set_fail_persist(true);
        let err = backend.persist(&Snapshot::default()).unwrap_err();
        assert_eq!(err.kind(), "storage");
        assert_eq!(backend.persist_count(), 0);
    }
}
