use super::effective_date;
use super::validation::{require_station_number, require_text, station_key};
use crate::error::{FirewatchError, FirewatchResult};
use crate::model::{CoverageAssignment, CoveredPeople, CoveredPerson};
use crate::repository::{CoverageRepository, MedicalRecordRepository, ResidentRepository};
use chrono::NaiveDate;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CoverageService {
    coverage: CoverageRepository,
    residents: ResidentRepository,
    medical_records: MedicalRecordRepository,
    reference_date: Option<NaiveDate>,
}

impl CoverageService {
    pub fn new(
        coverage: CoverageRepository,
        residents: ResidentRepository,
        medical_records: MedicalRecordRepository,
    ) -> Self {
        Self {
            coverage,
            residents,
            medical_records,
            reference_date: None,
        }
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn add(&self, assignment: CoverageAssignment) -> FirewatchResult<()> {
        require_text(&assignment.address, "address")?;
        debug!("Adding coverage assignment {:?}", assignment);

        if self.coverage.by_address(&assignment.address)?.is_some() {
            return Err(FirewatchError::conflict(format!(
                "Coverage assignment already exists for {}",
                assignment.address
            )));
        }
        let (address, station) = (assignment.address.clone(), assignment.station);
        self.coverage.upsert(assignment)?;
        info!("Coverage assignment added: {} -> {}", address, station);
        Ok(())
    }

    /// Change the coverage number of an existing address.
    pub fn update(&self, assignment: CoverageAssignment) -> FirewatchResult<CoverageAssignment> {
        require_text(&assignment.address, "address")?;
        debug!("Updating coverage assignment {:?}", assignment);

        let mut current = self
            .coverage
            .by_address(&assignment.address)?
            .ok_or_else(|| {
                FirewatchError::not_found(format!(
                    "No coverage assignment for {}",
                    assignment.address
                ))
            })?;
        current.station = assignment.station;
        self.coverage.upsert(current.clone())?;
        info!(
            "Coverage assignment updated: {} -> {}",
            current.address, current.station
        );
        Ok(current)
    }

    /// Deleting an unassigned address succeeds silently.
    pub fn delete(&self, address: &str) -> FirewatchResult<()> {
        require_text(address, "address")?;
        debug!("Deleting coverage assignment for {}", address);

        if let Some(assignment) = self.coverage.by_address(address)? {
            self.coverage.delete(&assignment)?;
        }
        Ok(())
    }

    /// Everybody living at an address covered by `station`, with an
    /// adult/child head count.
    pub fn covered_people(&self, station: i64) -> FirewatchResult<CoveredPeople> {
        require_station_number(station)?;
        debug!("Looking up people covered by station {}", station);

        let addresses = match station_key(station) {
            Some(key) => self.coverage.addresses_for(key)?,
            None => Vec::new(),
        };
        if addresses.is_empty() {
            return Err(FirewatchError::not_found(format!(
                "No coverage assignment with station number {}",
                station
            )));
        }

        let today = effective_date(self.reference_date);
        let residents = self.residents.by_addresses(&addresses)?;
        let mut adults = 0;
        for resident in &residents {
            let record = self
                .medical_records
                .require(&resident.first_name, &resident.last_name)?;
            if record.is_adult_on(today) {
                adults += 1;
            }
        }

        let persons: Vec<CoveredPerson> = residents.iter().map(CoveredPerson::from).collect();
        let children = persons.len() - adults;
        info!(
            "Station {} covers {} people ({} adults, {} children)",
            station,
            persons.len(),
            adults,
            children
        );
        Ok(CoveredPeople {
            persons,
            adults,
            children,
        })
    }
}
