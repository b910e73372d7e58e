//! `StateStore` implementations.
//!
//! - `FileStateStore`     — one JSON file per key under a data directory
//! - `InMemoryStateStore` — process-local map for tests and ephemeral runs

use std::{
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tempfile::NamedTempFile;
use tracing::debug;

use triage_contracts::error::{DeskError, DeskResult};
use triage_core::traits::StateStore;

// ── File store ───────────────────────────────────────────────────────────────

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a reader sees either the old or the new snapshot.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStateStore {
    fn load(&self, key: &str) -> DeskResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read", &path, e)),
        }
    }

    fn save(&self, key: &str, value: &str) -> DeskResult<()> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).map_err(|e| storage_error("create", &self.dir, e))?;

        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| storage_error("create temp file in", &self.dir, e))?;
        tmp.write_all(value.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| storage_error("write", tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| storage_error("replace", &path, e.error))?;

        debug!(key, path = %path.display(), bytes = value.len(), "state saved");
        Ok(())
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> DeskError {
    DeskError::Storage {
        reason: format!("failed to {} {}: {}", action, path.display(), err),
    }
}

// ── In-memory store ──────────────────────────────────────────────────────────

/// Clones share the same entries, so a test can keep a handle while the
/// client state owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, bypassing the trait.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl StateStore for InMemoryStateStore {
    fn load(&self, key: &str) -> DeskResult<Option<String>> {
        let entries = self.entries.lock().map_err(|e| DeskError::Storage {
            reason: format!("state lock poisoned: {}", e),
        })?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> DeskResult<()> {
        let mut entries = self.entries.lock().map_err(|e| DeskError::Storage {
            reason: format!("state lock poisoned: {}", e),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::new(dir.path().join("nested"));

        assert_eq!(store.load("triageLang").unwrap(), None);
        store.save("triageLang", "\"kn\"").unwrap();
        assert_eq!(store.load("triageLang").unwrap().as_deref(), Some("\"kn\""));
        assert!(store.path_for("triageLang").ends_with("triageLang.json"));
    }

    #[test]
    fn file_store_save_replaces_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::new(dir.path());

        store.save("triageHistory", "[1,2,3,4,5,6,7,8,9]").unwrap();
        store.save("triageHistory", "[]").unwrap();
        assert_eq!(store.load("triageHistory").unwrap().as_deref(), Some("[]"));

        // No temp files left behind.
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn in_memory_clones_share_entries() {
        let store = InMemoryStateStore::new();
        let handle = store.clone();
        store.save("k", "v").unwrap();
        assert_eq!(handle.load("k").unwrap().as_deref(), Some("v"));
        assert_eq!(handle.load("other").unwrap(), None);
    }
}
