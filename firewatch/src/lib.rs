// Firewatch Library
// Resident, coverage and medical record store for emergency dispatch lookups

pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod store;

pub use config::FirewatchConfig;
pub use error::{FirewatchError, FirewatchResult};
pub use service::FirewatchServices;
pub use store::RecordStore;

use std::sync::Arc;

/// Bootstrap the working file if configured, open it and wire the services.
pub fn open(config: &FirewatchConfig) -> FirewatchResult<FirewatchServices> {
    if config.reset_on_start {
        store::initialize_from_seed(&config.seed_file, &config.data_file)?;
    }
    let backend = Arc::new(store::JsonFileBackend::new(&config.data_file));
    let store = RecordStore::open(backend)?;
    Ok(FirewatchServices::new(Arc::new(store)))
}
