//! Flat record lists persisted whole under one storage key.
//!
//! Every write serializes the entire list. Reads never fail: a missing,
//! unreadable or corrupt blob is logged and treated as an empty list.

use crate::storage::KeyValueStore;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// An immutable-once-created entry in a record store
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Identifier used by [`RecordStore::remove`]
    fn record_id(&self) -> String;
}

/// Plain strings are their own identifier (favorited affirmations)
impl Record for String {
    fn record_id(&self) -> String {
        self.clone()
    }
}

/// Typed view over the list stored under a single key
#[derive(Debug, Clone, Copy)]
pub struct RecordStore<T> {
    key: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RecordStore<T> {
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            _record: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load the persisted list, or an empty list if none exists
    pub fn load_all(&self, kv: &dyn KeyValueStore) -> Vec<T> {
        let raw = match kv.get(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No records stored under {:?}", self.key);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Unable to read records under {:?}: {}. Using empty list.",
                    self.key,
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => {
                tracing::debug!("Loaded {} records from {:?}", records.len(), self.key);
                records
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse records under {:?}: {}. Using empty list.",
                    self.key,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Replace the persisted list
    pub fn save_all(&self, kv: &mut dyn KeyValueStore, records: &[T]) -> Result<()> {
        let contents = serde_json::to_string(records)?;
        kv.set(self.key, &contents)?;
        tracing::debug!("Saved {} records under {:?}", records.len(), self.key);
        Ok(())
    }

    /// Add a record at the end of the list and return the new list
    pub fn append(&self, kv: &mut dyn KeyValueStore, record: T) -> Result<Vec<T>> {
        let mut records = self.load_all(kv);
        records.push(record);
        self.save_all(kv, &records)?;
        Ok(records)
    }

    /// Add a record at the front of the list (newest first) and return the new list
    pub fn prepend(&self, kv: &mut dyn KeyValueStore, record: T) -> Result<Vec<T>> {
        let mut records = self.load_all(kv);
        records.insert(0, record);
        self.save_all(kv, &records)?;
        Ok(records)
    }

    /// Delete every record with the given identifier. No-op (and no write) if absent.
    pub fn remove(&self, kv: &mut dyn KeyValueStore, id: &str) -> Result<Vec<T>> {
        let mut records = self.load_all(kv);
        let before = records.len();
        records.retain(|r| r.record_id() != id);

        if records.len() != before {
            self.save_all(kv, &records)?;
        } else {
            tracing::debug!("No record {:?} under {:?}", id, self.key);
        }
        Ok(records)
    }
}
