//! Shared key-value media with change notification.
//!
//! A medium is the only channel between participants. Writes replace a
//! key's whole value and are published to every *other* handle subscribed
//! to that key; the writer never hears its own write back.

mod file;
mod memory;


pub use file::FileMedium;
pub use memory::{MemoryMedium, MemoryStore};

use tokio::sync::mpsc;
use winsync_common::MediumError;

pub type Result<T> = std::result::Result<T, MediumError>;

/// A key changed on the medium because another handle wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub key: String,
    pub old_value: Option<String>,
    /// `None` when the key was removed.
    pub new_value: Option<String>,
}

/// Synchronous get/set access to the shared record plus a subscription to
/// other writers' changes.
pub trait SharedMedium {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value of `key` and publish the change to other handles.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn subscribe(&self, key: &str) -> Result<Subscription>;
}

/// Stream of [`StorageChange`]s for one key.
///
/// Dropping the subscription stops delivery; any watcher backing it is kept
/// alive for exactly as long as the subscription.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<StorageChange>,
    _guard: Option<Box<dyn std::any::Any + Send>>,
}

impl Subscription {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<StorageChange>) -> Self {
        Self { rx, _guard: None }
    }

    pub(crate) fn with_guard(
        rx: mpsc::UnboundedReceiver<StorageChange>,
        guard: impl std::any::Any + Send + 'static,
    ) -> Self {
        Self {
            rx,
            _guard: Some(Box::new(guard)),
        }
    }

    /// Next queued change, without waiting.
    pub fn try_next(&mut self) -> Option<StorageChange> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next change. Returns `None` once the medium side is gone.
    pub async fn recv(&mut self) -> Option<StorageChange> {
        self.rx.recv().await
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("watching", &self._guard.is_some())
            .finish()
    }
}
