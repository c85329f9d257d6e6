use crate::error::FirewatchResult;
use crate::model::CoverageAssignment;
use crate::store::RecordStore;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct CoverageRepository {
    store: Arc<RecordStore>,
}

impl CoverageRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> FirewatchResult<Vec<CoverageAssignment>> {
        self.store.read(|s| s.coverage.clone())
    }

    /// Exact, case-sensitive address match.
    pub fn by_address(&self, address: &str) -> FirewatchResult<Option<CoverageAssignment>> {
        self.store
            .read(|s| s.coverage.iter().find(|c| c.address == address).cloned())
    }

    /// Addresses assigned to `station`, in collection order.
    pub fn addresses_for(&self, station: u32) -> FirewatchResult<Vec<String>> {
        self.store.read(|s| {
            s.coverage
                .iter()
                .filter(|c| c.station == station)
                .map(|c| c.address.clone())
                .collect()
        })
    }

    /// Replace any assignment for the same address, then persist.
    pub fn upsert(&self, assignment: CoverageAssignment) -> FirewatchResult<()> {
        let (address, station) = (assignment.address.clone(), assignment.station);
        self.store.mutate(|s| {
            s.coverage.retain(|c| c.address != assignment.address);
            s.coverage.push(assignment);
        })?;
        info!("Coverage assignment saved: {} -> {}", address, station);
        Ok(())
    }

    pub fn delete(&self, assignment: &CoverageAssignment) -> FirewatchResult<bool> {
        let removed = self.store.mutate(|s| {
            let before = s.coverage.len();
            s.coverage.retain(|c| c.address != assignment.address);
            before != s.coverage.len()
        })?;
        info!(
            "Coverage assignment deleted: {} -> {}",
            assignment.address, assignment.station
        );
        Ok(removed)
    }
}
