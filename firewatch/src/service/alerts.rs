//! Cross-collection dispatch queries.
//!
//! Each query is a single read pass over the repositories: validate the input,
//! resolve, join, respond. A required medical record that is missing aborts the
//! whole query with a data-integrity error; partial results are never returned.
//!
//! "Nothing found" policy per query:
//! - children at address, phones by station: empty result
//! - address report: not found only when there are neither residents nor a
//!   coverage assignment
//! - households by stations: not found when no station number resolves to an
//!   address; addresses with nobody living there still produce an entry
//! - people by last name, emails by city: not found

use super::effective_date;
use super::validation::{require_station_number, require_station_numbers, require_text, station_key};
use crate::error::{FirewatchError, FirewatchResult};
use crate::model::{
    AddressReport, ChildAlert, Household, MedicalRecord, Occupant, PersonInfo, Resident,
    ResidentMedicalInfo,
};
use crate::repository::{CoverageRepository, MedicalRecordRepository, ResidentRepository};
use chrono::NaiveDate;
use itertools::Itertools;
use tracing::{debug, info};

#[derive(Clone)]
pub struct AlertService {
    residents: ResidentRepository,
    coverage: CoverageRepository,
    medical_records: MedicalRecordRepository,
    reference_date: Option<NaiveDate>,
}

impl AlertService {
    pub fn new(
        residents: ResidentRepository,
        coverage: CoverageRepository,
        medical_records: MedicalRecordRepository,
    ) -> Self {
        Self {
            residents,
            coverage,
            medical_records,
            reference_date: None,
        }
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Minors living at `address`, each with the other residents sharing
    /// their surname.
    pub fn children_at_address(&self, address: &str) -> FirewatchResult<Vec<ChildAlert>> {
        require_text(address, "address")?;
        debug!("Looking up children at {}", address);

        let residents = self.residents.by_address(address)?;
        if residents.is_empty() {
            info!("Nobody lives at {}", address);
            return Ok(Vec::new());
        }

        let today = self.today();
        let with_records = self.with_medical_records(&residents)?;
        let children: Vec<ChildAlert> = with_records
            .iter()
            .filter(|(_, record)| record.is_minor_on(today))
            .map(|(child, record)| ChildAlert {
                first_name: child.first_name.clone(),
                last_name: child.last_name.clone(),
                age: record.age_on(today),
                household: residents
                    .iter()
                    .filter(|other| {
                        other.last_name == child.last_name && other.first_name != child.first_name
                    })
                    .map(Resident::id)
                    .collect(),
            })
            .collect();

        info!("Found {} children at {}", children.len(), address);
        Ok(children)
    }

    /// Distinct phone numbers of residents covered by `station`, first-seen order.
    pub fn phones_by_coverage_number(&self, station: i64) -> FirewatchResult<Vec<String>> {
        require_station_number(station)?;
        debug!("Looking up phone numbers covered by station {}", station);

        let addresses = self.addresses_for(station)?;
        if addresses.is_empty() {
            info!("Station {} covers no address", station);
            return Ok(Vec::new());
        }

        let phones: Vec<String> = self
            .residents
            .by_addresses(&addresses)?
            .into_iter()
            .map(|r| r.phone)
            .unique()
            .collect();

        info!("Found {} phone numbers for station {}", phones.len(), station);
        Ok(phones)
    }

    /// Residents at `address` with their medical details, plus the coverage
    /// number assigned to that exact address.
    pub fn household_and_coverage(&self, address: &str) -> FirewatchResult<AddressReport> {
        require_text(address, "address")?;
        debug!("Building address report for {}", address);

        let residents = self.residents.by_address(address)?;
        let with_records = self.with_medical_records(&residents)?;
        let assignment = self.coverage.by_address(address)?;

        if residents.is_empty() && assignment.is_none() {
            info!("No data for address {}", address);
            return Err(FirewatchError::not_found(format!(
                "No residents or coverage assignment for address {}",
                address
            )));
        }

        let today = self.today();
        let report = AddressReport {
            residents: with_records
                .iter()
                .map(|(r, m)| ResidentMedicalInfo::new(r, m, today))
                .collect(),
            coverage_number: assignment.map(|a| a.station),
        };
        info!(
            "Address report for {}: {} residents, station {:?}",
            address,
            report.residents.len(),
            report.coverage_number
        );
        Ok(report)
    }

    /// One entry per address covered by any of `stations`, in union order,
    /// including addresses where nobody lives.
    pub fn households_by_coverage_numbers(
        &self,
        stations: &[i64],
    ) -> FirewatchResult<Vec<Household>> {
        require_station_numbers(stations)?;
        debug!("Looking up households for stations {:?}", stations);

        let mut addresses = Vec::new();
        for station in stations {
            addresses.extend(self.addresses_for(*station)?);
        }
        let addresses: Vec<String> = addresses.into_iter().unique().collect();

        if addresses.is_empty() {
            info!("No address covered by stations {:?}", stations);
            return Err(FirewatchError::not_found(format!(
                "No coverage assignment with station numbers {:?}",
                stations
            )));
        }

        let today = self.today();
        let residents = self.residents.by_addresses(&addresses)?;
        let households = addresses
            .into_iter()
            .map(|address| -> FirewatchResult<Household> {
                let occupants = residents
                    .iter()
                    .filter(|r| r.address == address)
                    .map(|r| -> FirewatchResult<Occupant> {
                        let record = self.medical_records.require(&r.first_name, &r.last_name)?;
                        Ok(Occupant::new(r, &record, today))
                    })
                    .collect::<FirewatchResult<Vec<_>>>()?;
                Ok(Household { address, occupants })
            })
            .collect::<FirewatchResult<Vec<_>>>()?;

        info!(
            "Built {} households for stations {:?}",
            households.len(),
            stations
        );
        Ok(households)
    }

    /// Everybody with surname `last_name` (case-insensitive).
    pub fn people_by_last_name(&self, last_name: &str) -> FirewatchResult<Vec<PersonInfo>> {
        require_text(last_name, "lastName")?;
        debug!("Looking up people named {}", last_name);

        let residents = self.residents.by_last_name(last_name)?;
        if residents.is_empty() {
            info!("Nobody named {}", last_name);
            return Err(FirewatchError::not_found(format!(
                "No resident found with last name {}",
                last_name
            )));
        }

        let today = self.today();
        let people: Vec<PersonInfo> = self
            .with_medical_records(&residents)?
            .iter()
            .map(|(r, m)| PersonInfo::new(r, m, today))
            .collect();
        info!("Found {} people named {}", people.len(), last_name);
        Ok(people)
    }

    /// Distinct emails of residents of `city` (case-insensitive), first-seen order.
    pub fn emails_by_city(&self, city: &str) -> FirewatchResult<Vec<String>> {
        require_text(city, "city")?;
        debug!("Looking up emails for city {}", city);

        let emails: Vec<String> = self
            .residents
            .by_city(city)?
            .into_iter()
            .map(|r| r.email)
            .unique()
            .collect();

        if emails.is_empty() {
            info!("No email found for city {}", city);
            return Err(FirewatchError::not_found(format!(
                "No email found for city {}",
                city
            )));
        }
        info!("Found {} emails for city {}", emails.len(), city);
        Ok(emails)
    }

    fn today(&self) -> NaiveDate {
        effective_date(self.reference_date)
    }

    fn addresses_for(&self, station: i64) -> FirewatchResult<Vec<String>> {
        match station_key(station) {
            Some(key) => self.coverage.addresses_for(key),
            None => Ok(Vec::new()),
        }
    }

    /// Pair every resident with its required medical record.
    fn with_medical_records<'a>(
        &self,
        residents: &'a [Resident],
    ) -> FirewatchResult<Vec<(&'a Resident, MedicalRecord)>> {
        residents
            .iter()
            .map(|r| {
                self.medical_records
                    .require(&r.first_name, &r.last_name)
                    .map(|m| (r, m))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CoverageAssignment;
    use crate::repository::test_support::{record, resident, store_with};
    use crate::store::RecordStore;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn years_ago(years: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024 - years, 1, 15).unwrap()
    }

    fn service_for(store: Arc<RecordStore>) -> AlertService {
        AlertService::new(
            ResidentRepository::new(store.clone()),
            CoverageRepository::new(store.clone()),
            MedicalRecordRepository::new(store),
        )
        .with_reference_date(today())
    }

    fn culver() -> AlertService {
        let mut shared_phone = resident("Tessa", "Carman", "834 Binoc Ave", "Culver");
        shared_phone.phone = "841-874-6512".to_string();
        let mut john = resident("John", "Boyd", "1509 Culver St", "Culver");
        john.phone = "841-874-6512".to_string();
        john.email = "jaboyd@email.com".to_string();
        let mut jacob = resident("Jacob", "Boyd", "1509 Culver St", "Culver");
        jacob.email = "jaboyd@email.com".to_string();

        let (store, _) = store_with(
            vec![
                john,
                jacob,
                resident("Felicia", "Boyd", "1509 Culver St", "Culver"),
                resident("Roger", "Boyd", "1509 Culver St", "Culver"),
                resident("Jonanathan", "Marrack", "29 15th St", "Culver"),
                shared_phone,
                resident("Eric", "Cadigan", "951 LoneTree Rd", "Paris"),
            ],
            vec![
                CoverageAssignment::new("1509 Culver St", 3),
                CoverageAssignment::new("29 15th St", 2),
                CoverageAssignment::new("834 Binoc Ave", 3),
                CoverageAssignment::new("951 LoneTree Rd", 2),
                CoverageAssignment::new("1 Boulevard Carnot", 9),
            ],
            vec![
                record("John", "Boyd", years_ago(40)),
                record("Jacob", "Boyd", years_ago(7)),
                record("Felicia", "Boyd", years_ago(38)),
                record("Roger", "Boyd", years_ago(18)),
                record("Jonanathan", "Marrack", years_ago(35)),
                record("Tessa", "Carman", years_ago(12)),
                record("Eric", "Cadigan", years_ago(79)),
            ],
        );
        service_for(store)
    }

    #[test]
    fn test_children_at_address_lists_household() {
        let children = culver().children_at_address("1509 Culver St").unwrap();

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].first_name, "Jacob");
        assert_eq!(children[0].age, 7);
        assert_eq!(
            children[0].household,
            vec!["John Boyd", "Felicia Boyd", "Roger Boyd"]
        );
        // exactly 18 is a minor
        assert_eq!(children[1].first_name, "Roger");
        assert_eq!(children[1].age, 18);
    }

    #[test]
    fn test_children_never_include_adults() {
        let children = culver().children_at_address("1509 Culver St").unwrap();
        assert!(children.iter().all(|c| c.age <= 18));
    }

    #[test]
    fn test_children_empty_cases() {
        let svc = culver();
        assert!(svc.children_at_address("29 15th St").unwrap().is_empty());
        assert!(svc.children_at_address("nowhere").unwrap().is_empty());
        assert!(matches!(
            svc.children_at_address(" ").unwrap_err(),
            FirewatchError::Validation(_)
        ));
    }

    #[test]
    fn test_phones_are_distinct() {
        let phones = culver().phones_by_coverage_number(3).unwrap();
        let unique: Vec<_> = phones.iter().unique().collect();
        assert_eq!(phones.len(), unique.len());
        assert_eq!(phones[0], "841-874-6512");
    }

    #[test]
    fn test_phones_unknown_station_is_empty() {
        let svc = culver();
        assert!(svc.phones_by_coverage_number(42).unwrap().is_empty());
        assert!(matches!(
            svc.phones_by_coverage_number(-3).unwrap_err(),
            FirewatchError::Validation(_)
        ));
    }

    #[test]
    fn test_address_report_with_residents() {
        let report = culver().household_and_coverage("29 15th St").unwrap();
        assert_eq!(report.coverage_number, Some(2));
        assert_eq!(report.residents.len(), 1);
        assert_eq!(report.residents[0].address, "29 15th St 97451 Culver");
        assert_eq!(report.residents[0].age, 35);
    }

    #[test]
    fn test_address_report_coverage_without_residents() {
        let report = culver().household_and_coverage("1 Boulevard Carnot").unwrap();
        assert!(report.residents.is_empty());
        assert_eq!(report.coverage_number, Some(9));
    }

    #[test]
    fn test_address_report_nothing_at_all() {
        let err = culver().household_and_coverage("404 Nowhere").unwrap_err();
        assert!(matches!(err, FirewatchError::NotFound(_)));
    }

    #[test]
    fn test_households_include_uninhabited_addresses() {
        let households = culver().households_by_coverage_numbers(&[9]).unwrap();
        assert_eq!(
            households,
            vec![Household {
                address: "1 Boulevard Carnot".to_string(),
                occupants: vec![],
            }]
        );
    }

    #[test]
    fn test_households_cover_deduplicated_union() {
        let svc = culver();
        let households = svc.households_by_coverage_numbers(&[2, 3, 2]).unwrap();
        let addresses: Vec<_> = households.iter().map(|h| h.address.as_str()).collect();
        assert_eq!(
            addresses,
            vec!["29 15th St", "951 LoneTree Rd", "1509 Culver St", "834 Binoc Ave"]
        );
        assert_eq!(households[2].occupants.len(), 4);
    }

    #[test]
    fn test_households_validation_and_not_found() {
        let svc = culver();
        assert!(matches!(
            svc.households_by_coverage_numbers(&[]).unwrap_err(),
            FirewatchError::Validation(_)
        ));
        assert!(matches!(
            svc.households_by_coverage_numbers(&[1, -1]).unwrap_err(),
            FirewatchError::Validation(_)
        ));
        assert!(matches!(
            svc.households_by_coverage_numbers(&[41, 42]).unwrap_err(),
            FirewatchError::NotFound(_)
        ));
    }

    #[test]
    fn test_people_by_last_name_is_case_insensitive() {
        let people = culver().people_by_last_name("boyd").unwrap();
        assert_eq!(people.len(), 4);
        assert_eq!(people[0].email, "jaboyd@email.com");
        assert!(matches!(
            culver().people_by_last_name("Nobody").unwrap_err(),
            FirewatchError::NotFound(_)
        ));
    }

    #[test]
    fn test_emails_by_city() {
        let svc = culver();
        let emails = svc.emails_by_city("CULVER").unwrap();
        // John and Jacob share one address
        assert_eq!(emails.iter().filter(|e| *e == "jaboyd@email.com").count(), 1);
        assert_eq!(emails.len(), 5);
        assert_eq!(svc.emails_by_city("paris").unwrap().len(), 1);
        assert!(matches!(
            svc.emails_by_city("Lyon").unwrap_err(),
            FirewatchError::NotFound(_)
        ));
    }

    #[test]
    fn test_missing_medical_record_aborts_whole_query() {
        let (store, _) = store_with(
            vec![
                resident("John", "Boyd", "1509 Culver St", "Culver"),
                resident("Jacob", "Boyd", "1509 Culver St", "Culver"),
                resident("Tessa", "Carman", "834 Binoc Ave", "Culver"),
            ],
            vec![
                CoverageAssignment::new("1509 Culver St", 3),
                CoverageAssignment::new("834 Binoc Ave", 3),
            ],
            vec![
                record("John", "Boyd", years_ago(40)),
                record("Jacob", "Boyd", years_ago(7)),
            ],
        );
        let svc = service_for(store);

        for err in [
            svc.households_by_coverage_numbers(&[3]).unwrap_err(),
            svc.people_by_last_name("Carman").unwrap_err(),
            svc.household_and_coverage("834 Binoc Ave").unwrap_err(),
            svc.children_at_address("834 Binoc Ave").unwrap_err(),
        ] {
            assert!(matches!(err, FirewatchError::DataIntegrity(_)));
        }
        // queries that never need the record are unaffected
        assert_eq!(svc.phones_by_coverage_number(3).unwrap().len(), 3);
    }
}
