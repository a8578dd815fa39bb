//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator runs them all and
//! collects errors into a single `ConfigError`.

mod helpers;
mod keys;
mod misc;

#[cfg(test)]
mod tests;

use crate::schema::WinsyncConfig;
use winsync_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WinsyncConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    keys::validate_registry_keys(&mut errors, config);
    misc::validate_medium(&mut errors, config);
    misc::validate_polling(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
