//! JSON snapshot of the route store on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::model::{Choice, SavedRoute, now_secs};

/// On-disk layout.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct StoreData {
    /// Unix timestamp when the snapshot was written.
    #[serde(default)]
    pub saved_at_secs: u64,
    #[serde(default)]
    pub routes: Vec<SavedRoute>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A snapshot file location.
#[derive(Debug, Clone)]
pub(crate) struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot. A missing file is an empty store.
    pub fn load(&self) -> Result<StoreData, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreData::default());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            path: self.display(),
            message: e.to_string(),
        })
    }

    /// Serialize the store, stamping the write time.
    pub fn encode(data: &mut StoreData) -> Result<String, StoreError> {
        data.saved_at_secs = now_secs()?;
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Write encoded contents, creating parent directories if needed.
    pub fn write(&self, json: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }

    /// [`SnapshotFile::write`] on the blocking thread pool.
    pub async fn write_off_thread(&self, json: String) -> Result<(), StoreError> {
        let file = self.clone();
        tokio::task::spawn_blocking(move || file.write(&json)).await?
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.display(),
            source,
        }
    }
}
