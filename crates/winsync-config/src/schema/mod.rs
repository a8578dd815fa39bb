//! Configuration schema types for winsync.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults every participant assumes.

mod polling;
mod registry;
mod system;

pub use polling::*;
pub use registry::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for winsync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct WinsyncConfig {
    pub registry: RegistryConfig,
    pub medium: MediumConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shared_keys() {
        let config = WinsyncConfig::default();
        assert_eq!(config.registry.counter_key, "count");
        assert_eq!(config.registry.windows_key, "windows");
        assert_eq!(config.medium.kind, MediumKind::File);
        assert!(config.medium.directory.is_none());
        assert_eq!(config.polling.tick_interval_ms, 16);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn empty_toml_is_default() {
        let config: WinsyncConfig = toml::from_str("").unwrap();
        assert_eq!(config.registry.windows_key, "windows");
        assert_eq!(config.polling.tick_interval_ms, 16);
    }

    #[test]
    fn medium_kind_parses_lowercase() {
        let config: WinsyncConfig = toml::from_str(
            r#"
[medium]
kind = "memory"
"#,
        )
        .unwrap();
        assert_eq!(config.medium.kind, MediumKind::Memory);
    }

    #[test]
    fn log_level_parses_uppercase() {
        let config: WinsyncConfig = toml::from_str(
            r#"
[logging]
level = "WARNING"
"#,
        )
        .unwrap();
        assert_eq!(config.logging.level, LogLevel::Warning);
        assert_eq!(config.logging.level.directive(), "winsync=warn");
    }

    #[test]
    fn tick_interval_as_duration() {
        let polling = PollingConfig {
            tick_interval_ms: 250,
        };
        assert_eq!(polling.tick_interval(), std::time::Duration::from_millis(250));
    }
}
