//! Derived views produced by the aggregation queries. None of these are stored.

use super::{MedicalRecord, Resident};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A minor living at an address, with the co-residents sharing the surname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildAlert {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    /// Identity labels ("First Last") of the other household members.
    pub household: Vec<String>,
}

/// Resident entry of the household-and-coverage report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentMedicalInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub age: i32,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl ResidentMedicalInfo {
    pub fn new(resident: &Resident, record: &MedicalRecord, today: NaiveDate) -> Self {
        Self {
            first_name: resident.first_name.clone(),
            last_name: resident.last_name.clone(),
            address: resident.full_address(),
            phone: resident.phone.clone(),
            age: record.age_on(today),
            medications: record.medications.clone(),
            allergies: record.allergies.clone(),
        }
    }
}

/// Everybody at an address plus the coverage number serving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressReport {
    pub residents: Vec<ResidentMedicalInfo>,
    pub coverage_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupant {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub age: i32,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl Occupant {
    pub fn new(resident: &Resident, record: &MedicalRecord, today: NaiveDate) -> Self {
        Self {
            first_name: resident.first_name.clone(),
            last_name: resident.last_name.clone(),
            phone: resident.phone.clone(),
            age: record.age_on(today),
            medications: record.medications.clone(),
            allergies: record.allergies.clone(),
        }
    }
}

/// One covered address and its occupants; `occupants` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub address: String,
    pub occupants: Vec<Occupant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInfo {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub age: i32,
    pub email: String,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
}

impl PersonInfo {
    pub fn new(resident: &Resident, record: &MedicalRecord, today: NaiveDate) -> Self {
        Self {
            first_name: resident.first_name.clone(),
            last_name: resident.last_name.clone(),
            address: resident.full_address(),
            age: record.age_on(today),
            email: resident.email.clone(),
            medications: record.medications.clone(),
            allergies: record.allergies.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoveredPerson {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
}

impl From<&Resident> for CoveredPerson {
    fn from(resident: &Resident) -> Self {
        Self {
            first_name: resident.first_name.clone(),
            last_name: resident.last_name.clone(),
            address: resident.full_address(),
            phone: resident.phone.clone(),
        }
    }
}

/// People covered by one coverage number with an adult/child head count.
///
/// `adults + children == persons.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoveredPeople {
    pub persons: Vec<CoveredPerson>,
    pub adults: usize,
    pub children: usize,
}
