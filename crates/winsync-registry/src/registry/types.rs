//! Keys, presence state, and callback types for the registry.

use winsync_common::WindowId;

/// Medium keys holding the id counter and the window snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryKeys {
    pub counter: String,
    pub windows: String,
}

impl Default for RegistryKeys {
    fn default() -> Self {
        Self {
            counter: "count".into(),
            windows: "windows".into(),
        }
    }
}

/// Where this participant is in its join/leave lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Constructed, `init` not yet called.
    Detached,
    Joined(WindowId),
    /// Departure ran. The id is never reused.
    Departed(WindowId),
}

/// No-payload notification hook. Readers call back into the registry.
pub type Callback = Box<dyn FnMut() + Send>;
