//! winsync configuration system.
//!
//! Provides TOML-based configuration for the registry keys, the shared
//! medium, the host polling cadence, and logging. All sections use defaults
//! so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use winsync_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    LogLevel, LoggingConfig, MediumConfig, MediumKind, PollingConfig, RegistryConfig,
    WinsyncConfig, CONFIG_SCHEMA_VERSION,
};
pub use toml_loader::{load_from_path, resolve_medium_dir};

use winsync_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creates a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<WinsyncConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path.
pub fn load_config_from(path: &std::path::Path) -> Result<WinsyncConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &WinsyncConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = WinsyncConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"registry\""));
        assert!(json.contains("\"medium\""));
        assert!(json.contains("\"polling\""));
        assert!(json.contains("\"logging\""));
        assert!(json.contains("\"windows\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = WinsyncConfig::default();
        let json = config_to_json(&config);
        let parsed: WinsyncConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.registry.counter_key, "count");
        assert_eq!(parsed.medium.kind, MediumKind::File);
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[registry]\ncounter_key = \"windows\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
