//! Validation for the medium and polling sections.

use crate::schema::WinsyncConfig;

use super::helpers::validate_range;

/// Validate medium constraints.
pub(crate) fn validate_medium(errors: &mut Vec<String>, config: &WinsyncConfig) {
    if let Some(dir) = &config.medium.directory {
        if dir.trim().is_empty() {
            errors.push("medium.directory must not be empty when set".into());
        }
    }
}

/// Validate polling constraints.
pub(crate) fn validate_polling(errors: &mut Vec<String>, config: &WinsyncConfig) {
    validate_range(
        errors,
        "polling.tick_interval_ms",
        config.polling.tick_interval_ms,
        1,
        1000,
    );
}
