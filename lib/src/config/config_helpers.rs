// lib/src/config/config_helpers.rs

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use config::{Config, Environment, File};
use log::{debug, info};
use models::errors::{MedibookError, MedibookResult};

use crate::config::config_constants::{DEFAULT_CONFIG_FILE_NAME, ENV_PREFIX};
use crate::config::config_structs::AppConfig;

/// Loads the application configuration.
///
/// Sources are layered in order: built-in defaults, `config_path` when given
/// (otherwise `medibook.yaml` in the working directory if present), then
/// `MEDIBOOK_*` environment variables with `__` between nested keys, e.g.
/// `MEDIBOOK_STORAGE__ENGINE_TYPE=inmemory`.
pub fn load_app_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut config_builder = Config::builder();

    match config_path {
        Some(path) => {
            if !path.exists() {
                return Err(anyhow!("Config file {} does not exist", path.display()));
            }
            info!("Loading configuration from {}", path.display());
            config_builder = config_builder.add_source(File::from(path).required(true));
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE_NAME);
            if default_path.exists() {
                info!("Loading configuration from {}", default_path.display());
                config_builder = config_builder.add_source(File::from(default_path).required(false));
            }
        }
    }

    config_builder = config_builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = config_builder.build().context("Failed to load configuration")?;
    let app_config: AppConfig = config
        .try_deserialize()
        .context("Failed to parse configuration")?;
    validate_app_config(&app_config)?;
    debug!("Effective configuration: {:?}", app_config);
    Ok(app_config)
}

pub fn validate_app_config(config: &AppConfig) -> MedibookResult<()> {
    if config.booking.window_days < 1 {
        return Err(MedibookError::ConfigurationError(format!(
            "booking.window_days must be at least 1, got {}",
            config.booking.window_days
        )));
    }
    if config.booking.time_slots.is_empty() {
        return Err(MedibookError::ConfigurationError(
            "booking.time_slots must list at least one slot".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage_engine::StorageEngineType;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_apply_to_missing_sections() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "storage:\n  engine_type: inmemory\n  data_path: /tmp/medibook-test").unwrap();

        let config = load_app_config(Some(file.path())).unwrap();
        assert_eq!(config.storage.engine_type, StorageEngineType::InMemory);
        assert_eq!(config.booking.window_days, 30);
        assert_eq!(config.booking.time_slots.len(), 12);
        assert_eq!(config.chat.reply_delay_ms, 1500);
    }

    #[test]
    fn test_booking_overrides() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "booking:\n  window_days: 14\n  time_slots:\n    - \"08:00 AM\"\n    - \"08:30 AM\"").unwrap();

        let config = load_app_config(Some(file.path())).unwrap();
        assert_eq!(config.booking.window_days, 14);
        assert_eq!(config.booking.time_slots, vec!["08:00 AM".to_string(), "08:30 AM".to_string()]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_app_config(Some(Path::new("/nonexistent/medibook.yaml"))).is_err());
    }

    #[test]
    fn test_rejects_empty_slot_list() {
        let mut config = AppConfig::default();
        config.booking.time_slots.clear();
        assert!(matches!(validate_app_config(&config), Err(MedibookError::ConfigurationError(_))));

        let mut config = AppConfig::default();
        config.booking.window_days = 0;
        assert!(matches!(validate_app_config(&config), Err(MedibookError::ConfigurationError(_))));
    }
}
