use crate::error::{IngestError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SESSION_RECORD_VERSION: &str = "1.0";
pub const SESSION_FILE_NAME: &str = "dropcat_state.json";

/// On-disk projection of the file set: paths only, never content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    pub version: String,
    /// Unix milliseconds of the save. Records carrying any other timestamp shape
    /// (e.g. an ISO-8601 string) still load, with the timestamp read as 0.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: u64,
    #[serde(rename = "file_paths", default)]
    pub active_paths: Vec<PathBuf>,
    #[serde(rename = "deleted_files", default)]
    pub deleted_paths: Vec<PathBuf>,
    #[serde(default)]
    pub total_files: usize,
}

impl SessionRecord {
    pub fn new(active_paths: Vec<PathBuf>, deleted_paths: Vec<PathBuf>) -> Self {
        Self {
            version: SESSION_RECORD_VERSION.to_string(),
            timestamp: current_unix_ms(),
            total_files: active_paths.len(),
            active_paths,
            deleted_paths,
        }
    }
}

/// Persists [`SessionRecord`]s to one well-known file, rewritten whole on every save.
#[derive(Debug, Clone)]
pub struct SessionStateStore {
    path: PathBuf,
}

impl SessionStateStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at `<dir>/dropcat_state.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SESSION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_saved_state(&self) -> bool {
        self.path.exists()
    }

    /// Best-effort save. Failures are logged and reported as `false`.
    pub fn save(&self, active_paths: &[PathBuf], deleted_paths: &[PathBuf]) -> bool {
        match self.try_save(active_paths, deleted_paths) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to save session state: {err}");
                false
            }
        }
    }

    pub fn try_save(&self, active_paths: &[PathBuf], deleted_paths: &[PathBuf]) -> Result<()> {
        let record = SessionRecord::new(active_paths.to_vec(), deleted_paths.to_vec());
        let data = serde_json::to_vec_pretty(&record).map_err(persistence)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(persistence)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, data).map_err(persistence)?;
        std::fs::rename(&tmp, &self.path).map_err(persistence)?;
        log::debug!(
            "Saved session state ({} active, {} deleted) to {}",
            record.active_paths.len(),
            record.deleted_paths.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Last saved record with paths that vanished from disk silently dropped.
    /// Missing, unreadable or corrupt state yields `None`.
    pub fn load(&self) -> Option<SessionRecord> {
        match self.try_load() {
            Ok(record) => record,
            Err(err) => {
                log::warn!("Failed to load session state: {err}");
                None
            }
        }
    }

    pub fn try_load(&self) -> Result<Option<SessionRecord>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(persistence(err)),
        };
        let mut record: SessionRecord = serde_json::from_slice(&bytes).map_err(persistence)?;
        record.active_paths.retain(|p| p.exists());
        record.deleted_paths.retain(|p| p.exists());
        record.total_files = record.active_paths.len();
        Ok(Some(record))
    }

    /// Remove the persisted record if present.
    pub fn clear(&self) -> bool {
        match std::fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => true,
            Err(err) => {
                log::warn!("Failed to clear session state: {err}");
                false
            }
        }
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().unwrap_or_else(|| {
        log::debug!("Ignoring non-numeric session timestamp {value}");
        0
    }))
}

fn persistence(err: impl std::fmt::Display) -> IngestError {
    IngestError::PersistenceFailed(err.to_string())
}

fn current_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|dur| u64::try_from(dur.as_millis()).ok())
        .unwrap_or(0)
}
