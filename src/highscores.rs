//! Best score persistence
//!
//! The engine only sees the `ScoreStore` port: it loads the best score once at
//! startup and saves whenever a session beats it.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persistence port for the best score
pub trait ScoreStore {
    /// Stored best score, 0 when nothing is stored
    fn load(&self) -> u32;
    /// Persist a new best score
    fn save(&mut self, best_score: u32);
}

/// Errors from the file-backed store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed score record: {0}")]
    Format(#[from] serde_json::Error),
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Rc<Cell<u32>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_best(best_score: u32) -> Self {
        let store = Self::default();
        store.best.set(best_score);
        store
    }

    pub fn best(&self) -> u32 {
        self.best.get()
    }

    /// Number of times `save` was called
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.best.get()
    }

    fn save(&mut self, best_score: u32) {
        self.best.set(best_score);
        self.saves.set(self.saves.get() + 1);
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreRecord {
    best_score: u32,
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<u32, StoreError> {
        let text = std::fs::read_to_string(&self.path)?;
        // A bare integer is accepted as well as the JSON record
        if let Ok(best) = text.trim().parse::<u32>() {
            return Ok(best);
        }
        let record: ScoreRecord = serde_json::from_str(&text)?;
        Ok(record.best_score)
    }

    fn write(&self, best_score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(&ScoreRecord { best_score })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load(&self) -> u32 {
        if !self.path.exists() {
            log::info!("No best score found, starting fresh");
            return 0;
        }
        match self.read() {
            Ok(best) => {
                log::info!("Loaded best score {}", best);
                best
            }
            Err(e) => {
                log::warn!("Could not read best score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, best_score: u32) {
        match self.write(best_score) {
            Ok(()) => log::info!("Best score saved ({})", best_score),
            Err(e) => log::warn!("Could not save best score to {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_shares_slot() {
        let handle = MemoryScoreStore::with_best(3);
        let mut store = handle.clone();
        assert_eq!(store.load(), 3);

        store.save(9);
        assert_eq!(handle.best(), 9);
        assert_eq!(handle.save_count(), 1);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileScoreStore::new(dir.path().join("nested/best.json"));
        assert_eq!(store.load(), 0);

        store.save(42);
        assert_eq!(store.load(), 42);
        assert_eq!(JsonFileScoreStore::new(store.path()).load(), 42);
    }

    #[test]
    fn test_file_store_accepts_bare_integer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best");
        std::fs::write(&path, "17\n").unwrap();
        assert_eq!(JsonFileScoreStore::new(&path).load(), 17);
    }

    #[test]
    fn test_file_store_corrupt_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = JsonFileScoreStore::new(&path);
        assert!(matches!(store.read(), Err(StoreError::Format(_))));
        assert_eq!(store.load(), 0);
    }
}
