// lib/src/storage_engine/storage_engine.rs

use std::fmt::Debug;

use models::errors::StorageError;

/// String-keyed, string-valued storage shaped after the browser's local storage.
///
/// Every piece of durable application state goes through this trait, so a test
/// can hand the stores an [`super::InMemoryStorage`] instead of a real backend.
pub trait StorageEngine: Send + Sync + Debug {
    /// Retrieves the value for `key`, or `None` when it was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Lists every key currently stored.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Persists pending writes.
    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn get_type(&self) -> &'static str;
}
