//! Key-value persistence for serialized blobs.
//!
//! Every collection the app keeps lives under a single string key as one
//! JSON document. `FileStore` maps each key to `<root>/<key>.json` and
//! replaces the whole file on every write.

use crate::{Error, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage key for the mood history
pub const MOOD_ENTRIES_KEY: &str = "moodEntries";
/// Storage key for journal entries
pub const JOURNAL_ENTRIES_KEY: &str = "journalEntries";
/// Storage key for favorited affirmation texts
pub const FAVORITE_AFFIRMATIONS_KEY: &str = "favoriteAffirmations";
/// Storage key for the index of the affirmation on screen
pub const CURRENT_AFFIRMATION_KEY: &str = "currentAffirmation";
/// Storage key for the last selected breathing profile name
pub const BREATHING_PROFILE_KEY: &str = "breathingProfile";

/// Get/set access to string-keyed serialized blobs
pub trait KeyValueStore {
    /// Read the blob stored under `key`, or `None` if nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete the blob stored under `key`; no-op if absent
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Directory-backed store, one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(Error::Storage(format!("invalid storage key: {:?}", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            tracing::debug!("No blob stored under {:?}", key);
            return Ok(None);
        }

        let file = File::open(&path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
        Ok(Some(contents))
    }

    /// Atomically writes the blob by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root)?;

        let temp = NamedTempFile::new_in(&self.root)?;

        // Exclusive lock on the temp file serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} bytes under {:?}", value.len(), key);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Removed {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// Read and deserialize a single value, treating absent or unparsable data as `None`
pub fn load_value<T: serde::de::DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> Option<T> {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Unable to read {:?}: {}. Ignoring stored value.", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Failed to parse {:?}: {}. Ignoring stored value.", key, e);
            None
        }
    }
}

/// Serialize a single value and store it under `key`
pub fn save_value<T: serde::Serialize + ?Sized>(
    kv: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let contents = serde_json::to_string(value)?;
    kv.set(key, &contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("store"));

        store.set("moodEntries", "[1,2,3]").unwrap();
        assert_eq!(store.get("moodEntries").unwrap(), Some("[1,2,3]".into()));

        store.set("moodEntries", "[]").unwrap();
        assert_eq!(store.get("moodEntries").unwrap(), Some("[]".into()));
    }

    #[test]
    fn test_file_store_missing_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert_eq!(store.get("journalEntries").unwrap(), None);
    }

    #[test]
    fn test_file_store_remove() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("favoriteAffirmations", "[]").unwrap();
        store.remove("favoriteAffirmations").unwrap();
        assert_eq!(store.get("favoriteAffirmations").unwrap(), None);

        // Removing again is a no-op
        store.remove("favoriteAffirmations").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        assert!(matches!(
            store.set("../escape", "x"),
            Err(Error::Storage(_))
        ));
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_atomic_set_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("journalEntries", "[]").unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "journalEntries.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only journalEntries.json, found extras: {:?}",
            extras
        );
    }

    #[test]
    fn test_load_value_ignores_corrupt_blob() {
        let mut store = MemoryStore::new();
        store.set(CURRENT_AFFIRMATION_KEY, "{ not json").unwrap();

        let value: Option<usize> = load_value(&store, CURRENT_AFFIRMATION_KEY);
        assert_eq!(value, None);
    }

    #[test]
    fn test_save_and_load_value() {
        let mut store = MemoryStore::new();
        save_value(&mut store, CURRENT_AFFIRMATION_KEY, &7usize).unwrap();

        let value: Option<usize> = load_value(&store, CURRENT_AFFIRMATION_KEY);
        assert_eq!(value, Some(7));
        assert_eq!(store.len(), 1);
    }
}
