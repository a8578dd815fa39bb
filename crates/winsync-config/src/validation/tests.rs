//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = WinsyncConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_empty_windows_key() {
    let mut config = WinsyncConfig::default();
    config.registry.windows_key = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("registry.windows_key must not be empty"));
}

#[test]
fn catches_key_with_path_separator() {
    let mut config = WinsyncConfig::default();
    config.registry.counter_key = "../count".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("registry.counter_key"));
}

#[test]
fn catches_hidden_file_key() {
    let mut config = WinsyncConfig::default();
    config.registry.windows_key = ".windows".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("registry.windows_key"));
}

#[test]
fn accepts_namespaced_keys() {
    let mut config = WinsyncConfig::default();
    config.registry.counter_key = "demo.count-v2".into();
    config.registry.windows_key = "demo_windows".into();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_identical_keys() {
    let mut config = WinsyncConfig::default();
    config.registry.counter_key = "windows".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("must differ"));
}

#[test]
fn catches_blank_medium_directory() {
    let mut config = WinsyncConfig::default();
    config.medium.directory = Some("   ".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("medium.directory"));
}

#[test]
fn catches_tick_interval_zero() {
    let mut config = WinsyncConfig::default();
    config.polling.tick_interval_ms = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("polling.tick_interval_ms"));
}

#[test]
fn catches_tick_interval_too_large() {
    let mut config = WinsyncConfig::default();
    config.polling.tick_interval_ms = 5000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("polling.tick_interval_ms = 5000 is out of range [1, 1000]"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = WinsyncConfig::default();
    config.registry.counter_key = String::new();
    config.polling.tick_interval_ms = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("registry.counter_key"));
    assert!(err.contains("polling.tick_interval_ms"));
    assert!(err.contains("; "));
}
