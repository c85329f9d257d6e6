use crate::error::{FirewatchError, FirewatchResult};
use crate::model::{identity_label, MedicalRecord};
use crate::store::RecordStore;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct MedicalRecordRepository {
    store: Arc<RecordStore>,
}

impl MedicalRecordRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> FirewatchResult<Vec<MedicalRecord>> {
        self.store.read(|s| s.medical_records.clone())
    }

    /// Case-sensitive lookup on (first name, last name).
    pub fn by_identity(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> FirewatchResult<Option<MedicalRecord>> {
        self.store.read(|s| {
            s.medical_records
                .iter()
                .find(|m| m.has_identity(first_name, last_name))
                .cloned()
        })
    }

    /// Like [`Self::by_identity`], but a missing record means the stored
    /// collections are inconsistent and is reported as a data-integrity error.
    pub fn require(&self, first_name: &str, last_name: &str) -> FirewatchResult<MedicalRecord> {
        self.by_identity(first_name, last_name)?.ok_or_else(|| {
            let id = identity_label(first_name, last_name);
            warn!("No medical record for {}", id);
            FirewatchError::data_integrity(format!("Medical record not found for {}", id))
        })
    }

    pub fn upsert(&self, record: MedicalRecord) -> FirewatchResult<()> {
        let id = record.id();
        self.store.mutate(|s| {
            s.medical_records
                .retain(|m| !m.has_identity(&record.first_name, &record.last_name));
            s.medical_records.push(record);
        })?;
        info!("Medical record saved: {}", id);
        Ok(())
    }

    pub fn delete(&self, record: &MedicalRecord) -> FirewatchResult<bool> {
        let removed = self.store.mutate(|s| {
            let before = s.medical_records.len();
            s.medical_records
                .retain(|m| !m.has_identity(&record.first_name, &record.last_name));
            before != s.medical_records.len()
        })?;
        info!("Medical record deleted: {}", record.id());
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{record, store_with};
    use chrono::NaiveDate;

    fn repo() -> MedicalRecordRepository {
        let birth = NaiveDate::from_ymd_opt(1984, 3, 6).unwrap();
        let (store, _) = store_with(vec![], vec![], vec![record("John", "Boyd", birth)]);
        MedicalRecordRepository::new(store)
    }

    #[test]
    fn test_optional_lookup_reports_absence_as_none() {
        let repo = repo();
        assert!(repo.by_identity("John", "Boyd").unwrap().is_some());
        assert!(repo.by_identity("Jacob", "Boyd").unwrap().is_none());
        assert!(repo.by_identity("JOHN", "Boyd").unwrap().is_none());
    }

    #[test]
    fn test_require_raises_data_integrity() {
        let repo = repo();
        assert_eq!(repo.require("John", "Boyd").unwrap().first_name, "John");
        let err = repo.require("Jacob", "Boyd").unwrap_err();
        assert!(matches!(err, FirewatchError::DataIntegrity(_)));
        assert!(err.to_string().contains("Jacob Boyd"));
    }

    #[test]
    fn test_upsert_replaces_same_identity() {
        let repo = repo();
        let mut updated = repo.require("John", "Boyd").unwrap();
        updated.medications = vec!["aznol:350mg".to_string()];
        repo.upsert(updated.clone()).unwrap();

        assert_eq!(repo.all().unwrap(), vec![updated]);
    }
}
