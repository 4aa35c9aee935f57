//! String-keyed, string-valued persistence.
//!
//! The file backend keeps the whole map in memory and rewrites a flat JSON
//! object on every `set`, so a crash never leaves more than the last write
//! unapplied.

use crate::error::ReaderError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Abstract key/value persistence backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ReaderError>;
}

/// Volatile store used for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ReaderError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<BTreeMap<String, String>>(&data) {
                Ok(entries) => {
                    debug!(path = %path.display(), count = entries.len(), "Loaded settings store");
                    entries
                }
                Err(err) => {
                    warn!(path = %path.display(), "Ignoring corrupt settings store: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) => {
                debug!(path = %path.display(), "Starting with empty settings store: {err}");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), ReaderError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| ReaderError::Store(err.to_string()))?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| ReaderError::Store(err.to_string()))?;
        fs::write(&self.path, contents).map_err(|err| ReaderError::Store(err.to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ReaderError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites_values() {
        let mut store = MemoryStore::new();
        store.set("theme", "dark").unwrap();
        store.set("theme", "sepia").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("sepia"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = JsonFileStore::open(&path);
        assert!(store.get("fontSize").is_none());
        store.set("fontSize", "22").unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("fontSize").as_deref(), Some("22"));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert!(store.get("theme").is_none());
    }
}
