//! Persisted transition flag.
//!
//! The flag is the only state that crosses a navigation. It is a two-phase
//! handoff: the outgoing document commits it through a [`FlagWriter`], the
//! next document consumes it through a [`FlagReader`]. `consume` takes the
//! reader by value, so one document can read-and-clear at most once.

use crate::host::{KeyValueStore, StorageError};

/// Stored value meaning "a fade-out led here".
pub const TRANSITIONING: &str = "true";

/// What the incoming document found under the flag key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlagReading {
    Transitioning,
    Absent,
    /// Some other value; cleared and treated as no transition.
    Unrecognized(String),
}

impl FlagReading {
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning)
    }
}

/// Result of a consume: the reading, plus the clear failure if any.
#[derive(Clone, Debug, PartialEq)]
pub struct Consumed {
    pub reading: FlagReading,
    pub clear_error: Option<StorageError>,
}

/// Names the storage entry shared by both halves of a navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionFlag {
    key: String,
}

impl TransitionFlag {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn writer(&self) -> FlagWriter {
        FlagWriter {
            key: self.key.clone(),
        }
    }

    pub fn reader(&self) -> FlagReader {
        FlagReader {
            key: self.key.clone(),
        }
    }

    /// Look without clearing.
    pub fn peek(&self, store: &dyn KeyValueStore) -> Result<FlagReading, StorageError> {
        Ok(classify(store.get(&self.key)?))
    }
}

fn classify(value: Option<String>) -> FlagReading {
    match value {
        None => FlagReading::Absent,
        Some(v) if v == TRANSITIONING => FlagReading::Transitioning,
        Some(v) => FlagReading::Unrecognized(v),
    }
}

/// Producer half, held by the outgoing document.
#[derive(Clone, Debug)]
pub struct FlagWriter {
    key: String,
}

impl FlagWriter {
    pub fn commit(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(&self.key, TRANSITIONING)
    }
}

/// Consumer half, held by the incoming document.
#[derive(Debug)]
pub struct FlagReader {
    key: String,
}

impl FlagReader {
    /// Read the flag and clear any value found.
    ///
    /// Fails only when the read itself fails. A failed clear is reported in
    /// [`Consumed::clear_error`] alongside the reading.
    pub fn consume(self, store: &mut dyn KeyValueStore) -> Result<Consumed, StorageError> {
        let reading = classify(store.get(&self.key)?);
        let clear_error = match reading {
            FlagReading::Absent => None,
            _ => store.remove(&self.key).err(),
        };
        Ok(Consumed {
            reading,
            clear_error,
        })
    }
}
