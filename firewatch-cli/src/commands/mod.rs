//! CLI commands module

pub mod alert;
pub mod medical;
pub mod resident;
pub mod station;

use clap::Args;
use firewatch::{FirewatchError, FirewatchResult};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// A record given inline or read from a file, in the store document's JSON shape.
#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Inline JSON object
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,

    /// File holding the JSON object
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    pub fn parse<T: DeserializeOwned>(&self, what: &str) -> FirewatchResult<T> {
        let raw = match (&self.json, &self.file) {
            (Some(json), _) => json.clone(),
            (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
                FirewatchError::validation(format!("Cannot read {} payload {:?}: {}", what, path, e))
            })?,
            (None, None) => {
                return Err(FirewatchError::validation(format!(
                    "Missing {} payload",
                    what
                )))
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| FirewatchError::validation(format!("Invalid {} payload: {}", what, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firewatch::model::Resident;

    #[test]
    fn test_malformed_payload_is_validation_error() {
        let args = PayloadArgs {
            json: Some(r#"{"firstName":"John"}"#.to_string()),
            file: None,
        };
        let err = args.parse::<Resident>("resident").unwrap_err();
        assert!(matches!(err, FirewatchError::Validation(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_payload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resident.json");
        std::fs::write(
            &path,
            r#"{"firstName":"John","lastName":"Boyd","address":"1509 Culver St",
                "city":"Culver","zip":"97451","phone":"841-874-6512","email":"jaboyd@email.com"}"#,
        )
        .unwrap();
        let args = PayloadArgs {
            json: None,
            file: Some(path),
        };
        let resident: Resident = args.parse("resident").unwrap();
        assert_eq!(resident.id(), "John Boyd");
    }
}
