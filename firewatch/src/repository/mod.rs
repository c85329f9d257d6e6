//! Collection repositories.
//!
//! One repository per record type, each a thin view over the shared
//! [`RecordStore`](crate::store::RecordStore). Lookups scan linearly;
//! upsert and delete go through `RecordStore::mutate` and therefore persist.
//!
//! Optional lookups report absence as `None`. Only
//! [`MedicalRecordRepository::require`] turns absence into an error.

pub mod coverage;
pub mod medical_record;
pub mod resident;

pub use coverage::CoverageRepository;
pub use medical_record::MedicalRecordRepository;
pub use resident::ResidentRepository;

/// Case-insensitive exact comparison used by surname and city searches.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
