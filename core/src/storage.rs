use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::types::RunState;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable")]
    Unavailable,
}

/// Key-value-grensesnittet akkumulatoren persisterer gjennom. Én navneroms-
/// nøkkel per aktiv økt; `load` gir `None` når ingen økt pågår.
pub trait RunStateStore: Send {
    fn load(&self) -> Result<Option<RunState>, StorageError>;
    fn save(&self, state: &RunState) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Leser/skriver øktstilstand som JSON på disk.
/// Skriver via temp-fil + rename slik at en leser aldri ser en halv record.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunStateStore for FileStore {
    fn load(&self) -> Result<Option<RunState>, StorageError> {
        if !self.path.exists() {
            log::debug!("fant ingen øktstilstand på {}", self.path.display());
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let state: RunState = serde_json::from_str(&contents)?;
        Ok(Some(state))
    }

    fn save(&self, state: &RunState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory-lager for tester og som forgrunnsspeil. `Clone` deler recorden,
/// så to akkumulatorer kan simulere prosess-restart mot samme lager.
/// Lagrer JSON-strengen, ikke structen, for å holde serde-runden ærlig.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Arc<Mutex<Option<String>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slår av/på simulert lagringsfeil for feilsti-tester.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::Relaxed) {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl RunStateStore for MemoryStore {
    fn load(&self) -> Result<Option<RunState>, StorageError> {
        self.check_available()?;
        let record = self.record.lock().unwrap();
        match record.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &RunState) -> Result<(), StorageError> {
        self.check_available()?;
        let json = serde_json::to_string(state)?;
        *self.record.lock().unwrap() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.check_available()?;
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}
