// lib/src/storage_engine/storage_utils.rs

use log::warn;
use models::errors::{MedibookResult, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::keys::TRUE;
use super::storage_engine::StorageEngine;

/// Reads and parses the JSON value under `key`.
///
/// A missing key and a value that fails to parse both come back as `None`;
/// the latter is logged since it means another writer left the key corrupted.
pub fn read_json<T: DeserializeOwned>(engine: &dyn StorageEngine, key: &str) -> Result<Option<T>, StorageError> {
    let Some(raw) = engine.get_item(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Ignoring malformed JSON under '{}': {}", key, e);
            Ok(None)
        }
    }
}

/// Serializes `value` and writes it under `key`.
pub fn write_json<T: Serialize + ?Sized>(engine: &dyn StorageEngine, key: &str, value: &T) -> MedibookResult<()> {
    let raw = serde_json::to_string(value)?;
    engine.set_item(key, &raw)?;
    Ok(())
}

/// A flag is set only when its stored value is exactly `"true"`.
pub fn read_flag(engine: &dyn StorageEngine, key: &str) -> Result<bool, StorageError> {
    Ok(engine.get_item(key)?.as_deref() == Some(TRUE))
}

/// Reads a plain string, treating an empty value as absent.
pub fn read_string(engine: &dyn StorageEngine, key: &str) -> Result<Option<String>, StorageError> {
    Ok(engine.get_item(key)?.filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage_engine::InMemoryStorage;

    #[test]
    fn test_read_json_treats_garbage_as_absent() {
        let storage = InMemoryStorage::new();
        storage.set_item("userProfile", "{not json").unwrap();
        let value: Option<serde_json::Value> = read_json(&storage, "userProfile").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_read_flag_requires_literal_true() {
        let storage = InMemoryStorage::new();
        storage.set_item("isDoctor", "TRUE").unwrap();
        assert!(!read_flag(&storage, "isDoctor").unwrap());
        storage.set_item("isDoctor", "true").unwrap();
        assert!(read_flag(&storage, "isDoctor").unwrap());
        assert!(!read_flag(&storage, "isAdmin").unwrap());
    }
}
