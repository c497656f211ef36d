// lib/src/config/config_structs.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::config_defaults::*;
pub use crate::storage_engine::config::{StorageConfig, StorageEngineType};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingConfig {
    #[serde(default = "default_booking_window_days")]
    pub window_days: i64,
    /// Slots offered on every working day before existing bookings are removed.
    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<String>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        BookingConfig {
            window_days: default_booking_window_days(),
            time_slots: default_time_slots(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatConfig {
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    #[serde(default = "default_auto_reply")]
    pub auto_reply: String,
}

impl ChatConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            reply_delay_ms: default_reply_delay_ms(),
            auto_reply: default_auto_reply(),
        }
    }
}
