// lib/src/storage_engine/inmemory_storage.rs

use std::collections::HashMap;
use std::sync::RwLock;

use log::debug;
use models::errors::StorageError;

use super::storage_engine::StorageEngine;

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    items: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that refuses writes once keys plus values exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        InMemoryStorage {
            items: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn usage_without(items: &HashMap<String, String>, key: &str) -> usize {
        items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

fn poisoned() -> StorageError {
    StorageError::Backend("in-memory storage lock poisoned".to_string())
}

impl StorageEngine for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        if let Some(limit) = self.quota_bytes {
            let projected = Self::usage_without(&items, key) + key.len() + value.len();
            if projected > limit {
                debug!("Rejecting write of {} bytes to '{}' (quota {})", value.len(), key, limit);
                return Err(StorageError::QuotaExceeded { key: key.to_string(), limit });
            }
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        let mut keys: Vec<String> = items.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn get_type(&self) -> &'static str {
        "InMemory"
    }
}
