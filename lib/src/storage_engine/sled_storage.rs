// lib/src/storage_engine/sled_storage.rs

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};
use models::errors::StorageError;
use sled::{Db, Tree};

use super::storage_engine::StorageEngine;

pub const LOCAL_STORAGE_TREE: &str = "local_storage";

/// Sled-backed implementation of [`StorageEngine`].
///
/// All items live in a single tree named `local_storage`; keys and values are
/// stored as UTF-8 bytes.
pub struct SledStorage {
    db: Db,
    tree: Tree,
    path: PathBuf,
}

impl fmt::Debug for SledStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SledStorage")
            .field("tree", &LOCAL_STORAGE_TREE)
            .field("path", &self.path)
            .finish()
    }
}

impl SledStorage {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        info!("Opening Sled database at {:?}", path);
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| {
                error!("Failed to create database directory at {:?}: {}", path, e);
                StorageError::Unavailable(format!("Failed to create database directory at {:?}: {}", path, e))
            })?;
        } else if !path.is_dir() {
            return Err(StorageError::Unavailable(format!("Path {:?} is not a directory", path)));
        }

        let db = sled::Config::new().path(path).open().map_err(|e| {
            error!("Failed to open Sled database at {:?}: {}", path, e);
            StorageError::Unavailable(format!("Failed to open Sled database at {:?}: {}", path, e))
        })?;
        let tree = db.open_tree(LOCAL_STORAGE_TREE)?;
        Ok(SledStorage { db, tree, path: path.to_path_buf() })
    }

}

fn decode_utf8(bytes: &[u8]) -> Result<String, StorageError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| StorageError::Backend(format!("stored bytes are not valid UTF-8: {}", e)))
}

impl StorageEngine for SledStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.tree.get(key.as_bytes())? {
            Some(value) => Ok(Some(decode_utf8(&value)?)),
            None => Ok(None),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.tree.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.tree.remove(key.as_bytes())?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.tree
            .iter()
            .keys()
            .map(|key| decode_utf8(&key?))
            .collect()
    }

    fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

    fn get_type(&self) -> &'static str {
        "Sled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_items_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let storage = SledStorage::open(dir.path()).unwrap();
            storage.set_item("userName", "Amina").unwrap();
            storage.set_item("isLoggedIn", "true").unwrap();
            storage.remove_item("isLoggedIn").unwrap();
            storage.flush().unwrap();
        }

        let reopened = SledStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get_item("userName").unwrap().as_deref(), Some("Amina"));
        assert_eq!(reopened.get_item("isLoggedIn").unwrap(), None);
        assert_eq!(reopened.keys().unwrap(), vec!["userName".to_string()]);
    }

    #[test]
    fn test_open_rejects_file_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(SledStorage::open(&file), Err(StorageError::Unavailable(_))));
    }
}
