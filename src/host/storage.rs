//! Persisted key-value storage scoped to the page's origin.

use super::error::StorageError;

/// Synchronous storage that survives full page reloads.
///
/// Every call may fail. Callers keep each access inside its own error
/// boundary and never let a failure stop the page from becoming visible.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
