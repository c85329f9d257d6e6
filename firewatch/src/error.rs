//! Error type shared by the store, repositories and services.
//!
//! Every operation returns one of five kinds. Nothing is retried or recovered
//! internally; the caller decides how to surface each kind.

use thiserror::Error;

pub type FirewatchResult<T> = Result<T, FirewatchError>;

#[derive(Debug, Error)]
pub enum FirewatchError {
    /// Malformed, blank or negative input. Always raised before any lookup.
    #[error("Validation error: {0}")]
    Validation(String),
    /// A create targeted an identity that already exists.
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Stored collections disagree, e.g. a resident without a medical record.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FirewatchError {
    pub fn validation(msg: impl Into<String>) -> Self {
        FirewatchError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        FirewatchError::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        FirewatchError::NotFound(msg.into())
    }

    pub fn data_integrity(msg: impl Into<String>) -> Self {
        FirewatchError::DataIntegrity(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        FirewatchError::Storage(msg.into())
    }

    /// Stable lowercase name, used in machine-readable error output.
    pub fn kind(&self) -> &'static str {
        match self {
            FirewatchError::Validation(_) => "validation",
            FirewatchError::Conflict(_) => "conflict",
            FirewatchError::NotFound(_) => "not_found",
            FirewatchError::DataIntegrity(_) => "data_integrity",
            FirewatchError::Storage(_) => "storage",
        }
    }

    /// HTTP status an outer layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            FirewatchError::Validation(_) => 400,
            FirewatchError::NotFound(_) => 404,
            FirewatchError::Conflict(_) => 409,
            FirewatchError::DataIntegrity(_) | FirewatchError::Storage(_) => 500,
        }
    }
}

impl From<std::io::Error> for FirewatchError {
    fn from(e: std::io::Error) -> Self {
        FirewatchError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for FirewatchError {
    fn from(e: serde_json::Error) -> Self {
        FirewatchError::Storage(e.to_string())
    }
}
