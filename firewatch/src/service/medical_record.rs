use super::validation::require_identity;
use crate::error::{FirewatchError, FirewatchResult};
use crate::model::{identity_label, MedicalRecord};
use crate::repository::MedicalRecordRepository;
use tracing::{debug, info};

#[derive(Clone)]
pub struct MedicalRecordService {
    records: MedicalRecordRepository,
}

impl MedicalRecordService {
    pub fn new(records: MedicalRecordRepository) -> Self {
        Self { records }
    }

    pub fn add(&self, record: MedicalRecord) -> FirewatchResult<()> {
        require_identity(&record.first_name, &record.last_name)?;
        debug!("Adding medical record {}", record.id());

        if self
            .records
            .by_identity(&record.first_name, &record.last_name)?
            .is_some()
        {
            return Err(FirewatchError::conflict(format!(
                "Medical record already exists for {}",
                record.id()
            )));
        }
        let id = record.id();
        self.records.upsert(record)?;
        info!("Medical record added: {}", id);
        Ok(())
    }

    /// Overwrite birth date, medications and allergies of an existing record.
    pub fn update(&self, record: MedicalRecord) -> FirewatchResult<MedicalRecord> {
        require_identity(&record.first_name, &record.last_name)?;
        debug!("Updating medical record {}", record.id());

        let mut current = self
            .records
            .by_identity(&record.first_name, &record.last_name)?
            .ok_or_else(|| {
                FirewatchError::not_found(format!(
                    "Medical record not found for {}",
                    record.id()
                ))
            })?;
        current.apply_clinical(&record);
        self.records.upsert(current.clone())?;
        info!("Medical record updated: {}", current.id());
        Ok(current)
    }

    /// Deleting a record that does not exist succeeds silently.
    pub fn delete(&self, first_name: &str, last_name: &str) -> FirewatchResult<()> {
        require_identity(first_name, last_name)?;
        debug!(
            "Deleting medical record {}",
            identity_label(first_name, last_name)
        );

        if let Some(record) = self.records.by_identity(first_name, last_name)? {
            self.records.delete(&record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{record, store_with};
    use chrono::NaiveDate;

    fn birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1984, 3, 6).unwrap()
    }

    fn service() -> (MedicalRecordService, MedicalRecordRepository) {
        let (store, _) = store_with(vec![], vec![], vec![record("John", "Boyd", birth())]);
        let repo = MedicalRecordRepository::new(store);
        (MedicalRecordService::new(repo.clone()), repo)
    }

    #[test]
    fn test_add_conflict_and_success() {
        let (svc, repo) = service();
        assert!(matches!(
            svc.add(record("John", "Boyd", birth())).unwrap_err(),
            FirewatchError::Conflict(_)
        ));
        svc.add(record("Jacob", "Boyd", birth())).unwrap();
        assert_eq!(repo.all().unwrap().len(), 2);
    }

    #[test]
    fn test_update_keeps_identity() {
        let (svc, repo) = service();
        let mut change = record("John", "Boyd", NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        change.allergies = vec!["nillacilan".to_string()];

        svc.update(change).unwrap();

        let stored = repo.require("John", "Boyd").unwrap();
        assert_eq!(stored.birth_date, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert_eq!(stored.allergies, vec!["nillacilan".to_string()]);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (svc, _) = service();
        let err = svc.update(record("Jacob", "Boyd", birth())).unwrap_err();
        assert!(matches!(err, FirewatchError::NotFound(_)));
    }

    #[test]
    fn test_delete_missing_record_succeeds() {
        let (svc, repo) = service();
        svc.delete("Jacob", "Boyd").unwrap();
        assert_eq!(repo.all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_blank_identity_is_rejected() {
        let (svc, _) = service();
        assert!(matches!(
            svc.delete("", "Boyd").unwrap_err(),
            FirewatchError::Validation(_)
        ));
    }
}
