//! Record types held by the store and the derived views returned by queries.

pub mod coverage;
pub mod medical_record;
pub mod resident;
pub mod views;

pub use coverage::CoverageAssignment;
pub use medical_record::{MedicalRecord, ADULT_AGE_THRESHOLD};
pub use resident::Resident;
pub use views::*;

/// Display form of a (first name, last name) identity, e.g. "John Boyd".
pub fn identity_label(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}
