//! Registry and shared-medium configuration types.

use serde::{Deserialize, Serialize};

/// Medium keys used by every participant. All participants that should see
/// each other must agree on both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub counter_key: String,
    pub windows_key: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            counter_key: "count".into(),
            windows_key: "windows".into(),
        }
    }
}

/// Which medium backs the registry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum MediumKind {
    /// A directory of JSON files shared between processes.
    #[default]
    File,
    /// A process-local store; only in-process participants see each other.
    Memory,
}

/// Shared medium configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct MediumConfig {
    pub kind: MediumKind,
    /// Medium directory for `kind = "file"`. Defaults to the platform data
    /// directory when unset.
    pub directory: Option<String>,
}
