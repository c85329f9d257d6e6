//! Services layered on the repositories.
//!
//! - CRUD services (`ResidentService`, `CoverageService`, `MedicalRecordService`)
//!   implement add / update / delete with conflict and absence checks.
//! - `AlertService` answers the cross-collection dispatch queries.
//!
//! `FirewatchServices` wires all of them against one shared store.

pub mod alerts;
pub mod coverage;
pub mod medical_record;
pub mod resident;
mod validation;

pub use alerts::AlertService;
pub use coverage::CoverageService;
pub use medical_record::MedicalRecordService;
pub use resident::ResidentService;

use crate::repository::{CoverageRepository, MedicalRecordRepository, ResidentRepository};
use crate::store::RecordStore;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

/// Date ages are computed against: the pinned reference date, or today.
pub(crate) fn effective_date(reference_date: Option<NaiveDate>) -> NaiveDate {
    reference_date.unwrap_or_else(|| Local::now().date_naive())
}

/// Every service, sharing one record store.
#[derive(Clone)]
pub struct FirewatchServices {
    pub residents: ResidentService,
    pub coverage: CoverageService,
    pub medical_records: MedicalRecordService,
    pub alerts: AlertService,
}

impl FirewatchServices {
    pub fn new(store: Arc<RecordStore>) -> Self {
        let residents = ResidentRepository::new(store.clone());
        let coverage = CoverageRepository::new(store.clone());
        let medical_records = MedicalRecordRepository::new(store);

        Self {
            residents: ResidentService::new(residents.clone()),
            coverage: CoverageService::new(
                coverage.clone(),
                residents.clone(),
                medical_records.clone(),
            ),
            medical_records: MedicalRecordService::new(medical_records.clone()),
            alerts: AlertService::new(residents, coverage, medical_records),
        }
    }

    /// Pin the date used for age computations.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.coverage = self.coverage.with_reference_date(date);
        self.alerts = self.alerts.with_reference_date(date);
        self
    }
}
