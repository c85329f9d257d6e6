//! Runtime configuration: where the working data file and its seed live.

use crate::error::{FirewatchError, FirewatchResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewatchConfig {
    /// Working JSON document, rewritten after every mutation.
    pub data_file: PathBuf,
    /// Pristine document the working file is initialised from.
    pub seed_file: PathBuf,
    /// Copy the seed over the working file at start-up.
    pub reset_on_start: bool,
}

impl Default for FirewatchConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/working.json"),
            seed_file: PathBuf::from("data/data.json"),
            reset_on_start: true,
        }
    }
}

impl FirewatchConfig {
    /// Read a TOML file. A missing file yields the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> FirewatchResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            FirewatchError::storage(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            FirewatchError::Validation(msg) => {
                FirewatchError::validation(format!("{:?}: {}", path, msg))
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> FirewatchResult<Self> {
        toml::from_str(content)
            .map_err(|e| FirewatchError::validation(format!("Invalid configuration: {}", e)))
    }

    /// Overlay `FIREWATCH_DATA_FILE`, `FIREWATCH_SEED_FILE` and
    /// `FIREWATCH_RESET_ON_START` on top of `self`.
    pub fn with_env_overrides(self) -> FirewatchResult<Self> {
        self.overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> FirewatchResult<Self> {
        if let Some(path) = lookup("FIREWATCH_DATA_FILE") {
            self.data_file = PathBuf::from(path);
        }
        if let Some(path) = lookup("FIREWATCH_SEED_FILE") {
            self.seed_file = PathBuf::from(path);
        }
        if let Some(flag) = lookup("FIREWATCH_RESET_ON_START") {
            self.reset_on_start = match flag.to_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => true,
                "0" | "false" | "off" | "no" => false,
                other => {
                    return Err(FirewatchError::validation(format!(
                        "FIREWATCH_RESET_ON_START must be a boolean, got '{}'",
                        other
                    )))
                }
            };
        }
        Ok(self)
    }
}
