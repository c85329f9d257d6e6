//! Working-file bootstrap from a seed document.

use crate::error::{FirewatchError, FirewatchResult};
use std::fs;
use std::path::Path;
use tracing::info;

/// Copy `seed` over `working`, creating parent directories as needed.
pub fn initialize_from_seed(seed: &Path, working: &Path) -> FirewatchResult<()> {
    if !seed.is_file() {
        return Err(FirewatchError::storage(format!(
            "Seed file not found: {}",
            seed.display()
        )));
    }
    if let Some(parent) = working.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::copy(seed, working).map_err(|e| {
        FirewatchError::storage(format!(
            "Failed to copy seed {} to {}: {}",
            seed.display(),
            working.display(),
            e
        ))
    })?;
    info!("Data file initialized at {} from {}", working.display(), seed.display());
    Ok(())
}
