//! JSON file implementation of the SnapshotBackend trait.
//!
//! The whole snapshot lives in one pretty-printed JSON document. Every
//! persist rewrites the document through a temp file in the same directory
//! followed by a rename, so a crash mid-write never leaves a truncated file.

use super::types::{Snapshot, SnapshotBackend};
use crate::error::{FirewatchError, FirewatchResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(path: &Path) -> FirewatchResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    FirewatchError::storage(format!(
                        "Failed to create data directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, uuid::Uuid::new_v4()))
    }

    fn atomic_write(&self, data: &[u8]) -> FirewatchResult<()> {
        Self::ensure_parent(&self.path)?;
        let tmp = self.temp_path();
        let written = (|| -> std::io::Result<()> {
            let mut f = fs::File::create(&tmp)?;
            f.write_all(data)?;
            f.sync_all()?;
            fs::rename(&tmp, &self.path)
        })();
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(FirewatchError::storage(format!(
                "Failed to write data file {}: {}",
                self.path.display(),
                e
            )));
        }
        // Flush the directory entry where supported
        if let Some(dir) = self.path.parent() {
            if let Ok(dir_file) = fs::File::open(dir) {
                let _ = dir_file.sync_all();
            }
        }
        Ok(())
    }
}

impl SnapshotBackend for JsonFileBackend {
    fn load(&self) -> FirewatchResult<Snapshot> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            FirewatchError::storage(format!(
                "Failed to read data file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            FirewatchError::storage(format!(
                "Failed to parse data file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn persist(&self, snapshot: &Snapshot) -> FirewatchResult<()> {
        let content = serde_json::to_string_pretty(snapshot).map_err(|e| {
            FirewatchError::storage(format!("Failed to serialize snapshot: {}", e))
        })?;
        self.atomic_write(content.as_bytes())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
