use super::eq_ignore_case;
use crate::error::FirewatchResult;
use crate::model::Resident;
use crate::store::RecordStore;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct ResidentRepository {
    store: Arc<RecordStore>,
}

impl ResidentRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> FirewatchResult<Vec<Resident>> {
        self.store.read(|s| s.residents.clone())
    }

    /// Case-sensitive lookup on (first name, last name).
    pub fn by_identity(&self, first_name: &str, last_name: &str) -> FirewatchResult<Option<Resident>> {
        self.store.read(|s| {
            s.residents
                .iter()
                .find(|r| r.has_identity(first_name, last_name))
                .cloned()
        })
    }

    /// Case-insensitive exact surname match, in collection order.
    pub fn by_last_name(&self, last_name: &str) -> FirewatchResult<Vec<Resident>> {
        self.store.read(|s| {
            s.residents
                .iter()
                .filter(|r| eq_ignore_case(&r.last_name, last_name))
                .cloned()
                .collect()
        })
    }

    /// Case-insensitive exact city match, in collection order.
    pub fn by_city(&self, city: &str) -> FirewatchResult<Vec<Resident>> {
        self.store.read(|s| {
            s.residents
                .iter()
                .filter(|r| eq_ignore_case(&r.city, city))
                .cloned()
                .collect()
        })
    }

    pub fn by_address(&self, address: &str) -> FirewatchResult<Vec<Resident>> {
        self.by_addresses(&[address])
    }

    /// Residents whose address equals (case-sensitively) one of `addresses`.
    pub fn by_addresses<S: AsRef<str>>(&self, addresses: &[S]) -> FirewatchResult<Vec<Resident>> {
        self.store.read(|s| {
            s.residents
                .iter()
                .filter(|r| addresses.iter().any(|a| a.as_ref() == r.address))
                .cloned()
                .collect()
        })
    }

    /// Replace any resident with the same identity, then persist.
    pub fn upsert(&self, resident: Resident) -> FirewatchResult<()> {
        let id = resident.id();
        self.store.mutate(|s| {
            s.residents
                .retain(|r| !r.has_identity(&resident.first_name, &resident.last_name));
            s.residents.push(resident);
        })?;
        info!("Resident saved: {}", id);
        Ok(())
    }

    /// Remove the resident with the same identity, then persist.
    /// Returns whether anything was removed.
    pub fn delete(&self, resident: &Resident) -> FirewatchResult<bool> {
        let removed = self.store.mutate(|s| {
            let before = s.residents.len();
            s.residents
                .retain(|r| !r.has_identity(&resident.first_name, &resident.last_name));
            before != s.residents.len()
        })?;
        info!("Resident deleted: {}", resident.id());
        Ok(removed)
    }
}
