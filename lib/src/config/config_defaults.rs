// lib/src/config/config_defaults.rs

use std::path::PathBuf;

pub use crate::config::config_constants::*;
use crate::storage_engine::StorageEngineType;

pub fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIRECTORY)
}
pub fn default_storage_engine_type() -> StorageEngineType { StorageEngineType::Sled }
pub fn default_booking_window_days() -> i64 { DEFAULT_BOOKING_WINDOW_DAYS }
pub fn default_time_slots() -> Vec<String> {
    DEFAULT_TIME_SLOTS.iter().map(|slot| slot.to_string()).collect()
}
pub fn default_reply_delay_ms() -> u64 { DEFAULT_CHAT_REPLY_DELAY_MS }
pub fn default_auto_reply() -> String { DEFAULT_CHAT_AUTO_REPLY.to_string() }
