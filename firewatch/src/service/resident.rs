use super::validation::require_identity;
use crate::error::{FirewatchError, FirewatchResult};
use crate::model::{identity_label, Resident};
use crate::repository::ResidentRepository;
use tracing::{debug, info};

#[derive(Clone)]
pub struct ResidentService {
    residents: ResidentRepository,
}

impl ResidentService {
    pub fn new(residents: ResidentRepository) -> Self {
        Self { residents }
    }

    pub fn add(&self, resident: Resident) -> FirewatchResult<()> {
        require_identity(&resident.first_name, &resident.last_name)?;
        debug!("Adding resident {}", resident.id());

        if self
            .residents
            .by_identity(&resident.first_name, &resident.last_name)?
            .is_some()
        {
            return Err(FirewatchError::conflict(format!(
                "Resident already exists: {}",
                resident.id()
            )));
        }
        let id = resident.id();
        self.residents.upsert(resident)?;
        info!("Resident added: {}", id);
        Ok(())
    }

    /// Overwrite contact and address fields of an existing resident.
    pub fn update(&self, resident: Resident) -> FirewatchResult<Resident> {
        require_identity(&resident.first_name, &resident.last_name)?;
        debug!("Updating resident {}", resident.id());

        let mut current = self
            .residents
            .by_identity(&resident.first_name, &resident.last_name)?
            .ok_or_else(|| {
                FirewatchError::not_found(format!("Resident not found: {}", resident.id()))
            })?;
        current.apply_contact(&resident);
        self.residents.upsert(current.clone())?;
        info!("Resident updated: {}", current.id());
        Ok(current)
    }

    /// Deleting someone who is not stored succeeds silently.
    pub fn delete(&self, first_name: &str, last_name: &str) -> FirewatchResult<()> {
        require_identity(first_name, last_name)?;
        debug!("Deleting resident {}", identity_label(first_name, last_name));

        if let Some(resident) = self.residents.by_identity(first_name, last_name)? {
            self.residents.delete(&resident)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{resident, store_with};
    use crate::store::InMemoryBackend;
    use std::sync::Arc;

    fn service() -> (ResidentService, ResidentRepository, Arc<InMemoryBackend>) {
        let (store, backend) = store_with(
            vec![resident("John", "Boyd", "1509 Culver St", "Culver")],
            vec![],
            vec![],
        );
        let repo = ResidentRepository::new(store);
        (ResidentService::new(repo.clone()), repo, backend)
    }

    #[test]
    fn test_add_conflict() {
        let (svc, _, _) = service();
        let err = svc
            .add(resident("John", "Boyd", "elsewhere", "Culver"))
            .unwrap_err();
        assert!(matches!(err, FirewatchError::Conflict(_)));
    }

    #[test]
    fn test_add_requires_identity() {
        let (svc, _, backend) = service();
        let err = svc.add(resident(" ", "Boyd", "x", "Culver")).unwrap_err();
        assert!(matches!(err, FirewatchError::Validation(_)));
        assert_eq!(backend.persist_count(), 0);
    }

    #[test]
    fn test_add_differing_only_by_case_is_a_new_identity() {
        let (svc, repo, _) = service();
        svc.add(resident("john", "Boyd", "1509 Culver St", "Culver"))
            .unwrap();
        assert_eq!(repo.all().unwrap().len(), 2);
    }

    #[test]
    fn test_update_overwrites_contact_fields_only() {
        let (svc, repo, _) = service();
        let mut change = resident("John", "Boyd", "112 Steppes Pl", "Culver");
        change.phone = "841-874-0000".to_string();
        change.email = "new@email.com".to_string();

        let updated = svc.update(change).unwrap();

        assert_eq!(updated.address, "112 Steppes Pl");
        assert_eq!(updated.phone, "841-874-0000");
        assert_eq!(repo.by_identity("John", "Boyd").unwrap().unwrap(), updated);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (svc, _, _) = service();
        let err = svc.update(resident("Nobody", "Here", "x", "y")).unwrap_err();
        assert!(matches!(err, FirewatchError::NotFound(_)));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (svc, repo, backend) = service();
        svc.delete("John", "Boyd").unwrap();
        assert!(repo.all().unwrap().is_empty());
        let persisted = backend.persist_count();

        svc.delete("John", "Boyd").unwrap();
        assert_eq!(backend.persist_count(), persisted);
    }
}
