//! Reading `config.toml` from an explicit path or the platform default.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};
use winsync_common::ConfigError;

use super::paths::{create_default_config, default_config_path};
use crate::schema::WinsyncConfig;
use crate::validation;

/// Parse a winsync config file.
///
/// Missing sections and fields take their defaults. A file that does not
/// exist is `ConfigError::FileNotFound`; any other read failure and any TOML
/// error is `ConfigError::ParseError`. Validation problems are only logged
/// here: callers that must reject them go through `load_config_from`.
pub fn load_from_path(path: &Path) -> Result<WinsyncConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    let config: WinsyncConfig = toml::from_str(&content).map_err(|e| {
        ConfigError::ParseError(format!("invalid TOML in {}: {e}", path.display()))
    })?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "config has invalid values: {e}");
    }

    info!(
        path = %path.display(),
        medium = ?config.medium.kind,
        windows_key = %config.registry.windows_key,
        "loaded config"
    );
    Ok(config)
}

/// Load `winsync/config.toml` from the platform config directory.
///
/// `FileNotFound` is the first-run case: the commented template is written
/// to that path and the built-in defaults are returned. Parse errors are
/// returned unchanged so a broken file is never overwritten.
pub fn load_default() -> Result<WinsyncConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no config yet, writing template");
            create_default_config(&path)?;
            Ok(WinsyncConfig::default())
        }
        other => other,
    }
}
