//! Snapshot document and the backend contract used to load and persist it.

use crate::error::FirewatchResult;
use crate::model::{CoverageAssignment, MedicalRecord, Resident};
use serde::{Deserialize, Serialize};

/// The three collections, exactly as they appear in the store document.
///
/// Collections are flat and unordered from the caller's point of view; the
/// store keeps insertion order so query results are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "persons", default)]
    pub residents: Vec<Resident>,
    #[serde(rename = "firestations", default)]
    pub coverage: Vec<CoverageAssignment>,
    #[serde(rename = "medicalrecords", default)]
    pub medical_records: Vec<MedicalRecord>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.residents.is_empty() && self.coverage.is_empty() && self.medical_records.is_empty()
    }
}

/// Storage-agnostic load/persist contract for a whole snapshot.
///
/// Backends must be Send + Sync so a store can be shared behind an Arc.
pub trait SnapshotBackend: Send + Sync {
    /// Read the full snapshot. Unreadable or malformed data is a storage error.
    fn load(&self) -> FirewatchResult<Snapshot>;

    /// Replace the durable copy with `snapshot`.
    fn persist(&self, snapshot: &Snapshot) -> FirewatchResult<()>;

    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;
}
