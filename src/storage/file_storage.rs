use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Word not found: {0}")]
    WordNotFound(String),

    #[error("Duplicate word: {0}")]
    DuplicateWord(String),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Root of the on-disk data layout. All sub-stores hang off this path.
pub struct DataRoot {
    base_path: PathBuf,
}

impl DataRoot {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("wortschatz"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize the data directory. A failure here means the backing
    /// store is unusable and must be surfaced, not swallowed.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).map_err(|e| {
            StorageError::Unavailable(format!(
                "cannot create data directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// Directory holding the per-scope vocabulary documents
    pub fn vocabulary_dir(&self) -> PathBuf {
        self.base_path.join("vocabulary")
    }

    /// Directory holding the per-scope session logs
    pub fn sessions_dir(&self) -> PathBuf {
        self.base_path.join("sessions")
    }

    /// Directory holding the per-scope learner profiles
    pub fn profiles_dir(&self) -> PathBuf {
        self.base_path.join("profiles")
    }

    /// Path of the trainer settings document
    pub fn settings_path(&self) -> PathBuf {
        self.base_path.join("settings.json")
    }
}

/// Save a JSON document using atomic write (write to .tmp then rename)
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
