//! Config path resolution and default file creation.

use std::path::{Path, PathBuf};

use tracing::info;
use winsync_common::ConfigError;

use super::template::default_config_toml;
use crate::schema::WinsyncConfig;

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("winsync").join("config.toml"))
}

/// Get the platform-specific default directory for the file medium.
pub fn default_medium_dir() -> Result<PathBuf, ConfigError> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine data directory".into()))?;
    Ok(data_dir.join("winsync").join("medium"))
}

/// The configured medium directory, or the platform default when unset.
pub fn resolve_medium_dir(config: &WinsyncConfig) -> Result<PathBuf, ConfigError> {
    match &config.medium.directory {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => default_medium_dir(),
    }
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let content = default_config_toml();

    std::fs::write(path, content).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}
