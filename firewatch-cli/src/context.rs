//! CLI context - configuration and the lazily opened services

use crate::output::OutputFormat;
use chrono::NaiveDate;
use firewatch::{FirewatchConfig, FirewatchResult, FirewatchServices};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Command-line values that take precedence over file and environment configuration.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub data_file: Option<PathBuf>,
    pub seed_file: Option<PathBuf>,
    pub no_reset: bool,
}

pub struct CliContext {
    /// Configuration file that was read, if any
    pub config_path: Option<PathBuf>,
    pub config: FirewatchConfig,
    pub output_format: OutputFormat,
    /// Pins the date ages are computed against
    pub reference_date: Option<NaiveDate>,
    services: Option<FirewatchServices>,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>, overrides: &Overrides) -> FirewatchResult<Self> {
        let config_path = config_path.or_else(Self::default_config_path);
        let config = match &config_path {
            Some(path) => FirewatchConfig::from_file(path)?,
            None => FirewatchConfig::default(),
        };
        let config = Self::apply(config.with_env_overrides()?, overrides);
        debug!("Resolved configuration {:?} from {:?}", config, config_path);

        Ok(Self {
            config_path,
            config,
            output_format: OutputFormat::Table,
            reference_date: None,
            services: None,
        })
    }

    fn default_config_path() -> Option<PathBuf> {
        ["config/firewatch.toml", "firewatch.toml"]
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
            .map(Path::to_path_buf)
    }

    fn apply(mut config: FirewatchConfig, overrides: &Overrides) -> FirewatchConfig {
        if let Some(path) = &overrides.data_file {
            config.data_file = path.clone();
        }
        if let Some(path) = &overrides.seed_file {
            config.seed_file = path.clone();
        }
        if overrides.no_reset {
            config.reset_on_start = false;
        }
        config
    }

    /// Open the store on first use. Seeding happens here, so commands that
    /// fail argument parsing never touch the working file.
    pub fn services(&mut self) -> FirewatchResult<&FirewatchServices> {
        let services = match self.services.take() {
            Some(services) => services,
            None => {
                let services = firewatch::open(&self.config)?;
                match self.reference_date {
                    Some(date) => services.with_reference_date(date),
                    None => services,
                }
            }
        };
        Ok(self.services.insert(services))
    }
}
