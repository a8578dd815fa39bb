//! Medium key validation.
//!
//! Keys double as file names for the file medium, so they are restricted to
//! a portable character set.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::WinsyncConfig;

static KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

fn validate_key(errors: &mut Vec<String>, name: &str, key: &str) {
    if key.is_empty() {
        errors.push(format!("{name} must not be empty"));
    } else if !KEY_RE.is_match(key) || key.starts_with('.') {
        errors.push(format!(
            "{name} = {key:?} must use only letters, digits, '_', '-', '.' and not start with '.'"
        ));
    }
}

/// Validate the counter and snapshot keys.
pub(crate) fn validate_registry_keys(errors: &mut Vec<String>, config: &WinsyncConfig) {
    let registry = &config.registry;
    validate_key(errors, "registry.counter_key", &registry.counter_key);
    validate_key(errors, "registry.windows_key", &registry.windows_key);

    if registry.counter_key == registry.windows_key {
        errors.push(format!(
            "registry.counter_key and registry.windows_key must differ (both {:?})",
            registry.counter_key
        ));
    }
}
