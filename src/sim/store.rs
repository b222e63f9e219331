//! In-memory persisted storage.

use crate::host::{KeyValueStore, StorageError};
use std::collections::BTreeMap;

/// A successful mutation, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreWrite {
    Set { key: String, value: String },
    Remove { key: String },
}

/// Origin storage with failure injection.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    available: bool,
    quota_exceeded: bool,
    fail_removes: bool,
    writes: Vec<StoreWrite>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            available: true,
            quota_exceeded: false,
            fail_removes: false,
            writes: Vec::new(),
        }
    }

    /// Storage where every call fails, as in a locked-down private window.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Make every `set` fail with [`StorageError::QuotaExceeded`].
    pub fn exceed_quota(&mut self, exceeded: bool) {
        self.quota_exceeded = exceeded;
    }

    pub fn fail_removes(&mut self, fail: bool) {
        self.fail_removes = fail;
    }

    /// Seed a value without recording a write.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Inspect a value, bypassing availability.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn writes(&self) -> &[StoreWrite] {
        &self.writes
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable("storage is disabled".to_string()))
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        if self.quota_exceeded {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes.push(StoreWrite::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        if self.fail_removes {
            return Err(StorageError::Unavailable(format!("cannot remove '{key}'")));
        }
        self.entries.remove(key);
        self.writes.push(StoreWrite::Remove {
            key: key.to_string(),
        });
        Ok(())
    }
}
