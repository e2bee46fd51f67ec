use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use shared_models::{Appointment, User};

/// The persisted layout: three logical records, serialized wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub session: Option<User>,
    pub appointments: Vec<Appointment>,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Persistence collaborator for the record store. Implementations own
/// nothing but the bytes; the `RecordStore` owns the collections.
pub trait StoreBackend: Send + Sync {
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// Whole-store JSON document on disk.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StoreBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no store document at {}, starting empty", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let snapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write-then-rename so a failed write never truncates the document.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;

        debug!("persisted store document to {}", self.path.display());
        Ok(())
    }
}

/// In-memory backend: the test double, and the fallback when no data
/// path is configured.
#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Option<Snapshot>>,
}

impl StoreBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let guard = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        *guard = Some(snapshot.clone());
        Ok(())
    }
}
