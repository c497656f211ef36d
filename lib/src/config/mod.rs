// lib/src/config/mod.rs

pub mod config_constants;
pub mod config_defaults;
pub mod config_helpers;
pub mod config_structs;

pub use config_constants::*;
pub use config_helpers::{load_app_config, validate_app_config};
pub use config_structs::{AppConfig, BookingConfig, ChatConfig, StorageConfig, StorageEngineType};
