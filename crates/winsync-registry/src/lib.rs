//! Cross-process window registry.
//!
//! Every participant keeps its own copy of a shared, ordered list of window
//! descriptors. The list lives in a [`SharedMedium`] (an in-memory store for
//! tests and single-process hosts, or a directory of JSON files for separate
//! processes). Participants join with [`WindowRegistry::init`], publish their
//! own geometry when it drifts, pick up other participants' writes through
//! the medium's change notifications, and remove themselves on teardown.

pub mod geometry;
pub mod medium;
pub mod registry;

pub use geometry::{GeometrySource, SharedGeometry};
pub use medium::{FileMedium, MemoryMedium, MemoryStore, SharedMedium, StorageChange, Subscription};
pub use registry::{Presence, RegistryKeys, WindowRegistry};
