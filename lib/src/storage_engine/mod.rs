// lib/src/storage_engine/mod.rs

// Module declarations
pub mod config;
pub mod inmemory_storage;
pub mod keys;
pub mod sled_storage;
pub mod storage_engine;
pub mod storage_utils;

// Re-export key types and traits for external use
pub use config::{StorageConfig, StorageEngineType};
pub use inmemory_storage::InMemoryStorage;
pub use sled_storage::SledStorage;
pub use storage_engine::StorageEngine;

use std::sync::Arc;

use log::info;
use models::errors::MedibookResult;

/// Creates a storage engine instance based on the provided configuration.
///
/// Sled is the default engine; `inmemory` is meant for demos and tests and
/// honours the optional byte quota.
pub fn create_storage(config: &StorageConfig) -> MedibookResult<Arc<dyn StorageEngine>> {
    info!("Creating {} storage engine", config.engine_type);
    match config.engine_type {
        StorageEngineType::Sled => {
            let storage = SledStorage::open(&config.data_path)?;
            Ok(Arc::new(storage) as Arc<dyn StorageEngine>)
        }
        StorageEngineType::InMemory => {
            let storage = match config.quota_bytes {
                Some(limit) => InMemoryStorage::with_quota(limit),
                None => InMemoryStorage::new(),
            };
            Ok(Arc::new(storage) as Arc<dyn StorageEngine>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_storage_selects_engine() {
        let dir = TempDir::new().unwrap();
        let sled = create_storage(&StorageConfig {
            engine_type: StorageEngineType::Sled,
            data_path: dir.path().join("sled"),
            quota_bytes: None,
        })
        .unwrap();
        assert_eq!(sled.get_type(), "Sled");

        let memory = create_storage(&StorageConfig {
            engine_type: StorageEngineType::InMemory,
            data_path: dir.path().to_path_buf(),
            quota_bytes: Some(8),
        })
        .unwrap();
        assert_eq!(memory.get_type(), "InMemory");
        assert!(memory.set_item("appointments", "[]").is_err());
    }
}
