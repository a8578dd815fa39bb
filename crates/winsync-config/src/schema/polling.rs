//! Host polling cadence.

use serde::{Deserialize, Serialize};

/// How often the host drives the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Milliseconds between ticks (valid range: 1-1000). Each tick drains
    /// remote changes and reports the local shape.
    pub tick_interval_ms: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
        }
    }
}

impl PollingConfig {
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(u64::from(self.tick_interval_ms))
    }
}
