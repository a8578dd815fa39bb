use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier allocated from the shared counter. Never reused while the
/// counter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Screen rectangle of a window in the shared screen coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowShape {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl WindowShape {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Exact component-wise comparison. Fractional jitter counts as a change.
    pub fn differs_from(&self, other: &WindowShape) -> bool {
        self.x != other.x || self.y != other.y || self.w != other.w || self.h != other.h
    }
}

/// One entry of the shared snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    pub id: WindowId,
    pub shape: WindowShape,
    /// Application payload, carried without interpretation.
    #[serde(rename = "metaData", default)]
    pub meta_data: serde_json::Value,
}

/// Ordered window list as stored under the snapshot key.
pub type Snapshot = Vec<WindowDescriptor>;
