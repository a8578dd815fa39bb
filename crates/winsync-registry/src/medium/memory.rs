//! Process-local medium: every handle connected to the same
//! [`MemoryStore`] sees the same keys.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::debug;
use winsync_common::MediumError;

use super::{Result, SharedMedium, StorageChange, Subscription};

struct Subscriber {
    handle: u64,
    key: String,
    tx: mpsc::UnboundedSender<StorageChange>,
}

#[derive(Default)]
struct StoreInner {
    values: HashMap<String, String>,
    subscribers: Vec<Subscriber>,
    next_handle: u64,
}

/// Backing store shared by all [`MemoryMedium`] handles.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new handle with its own identity. Writes through it are
    /// published to every other handle.
    pub fn connect(&self) -> MemoryMedium {
        let handle = match self.lock() {
            Ok(mut inner) => {
                inner.next_handle += 1;
                inner.next_handle
            }
            Err(_) => 0,
        };
        MemoryMedium {
            store: self.clone(),
            handle,
        }
    }

    /// Current raw value of `key`, for inspection.
    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().ok()?.values.get(key).cloned()
    }

    /// Write `value` as an outside party: every subscriber is notified.
    pub fn set_external(&self, key: &str, value: &str) -> Result<()> {
        self.write(None, key, Some(value.to_string()))
    }

    /// Remove `key` as an outside party, notifying every subscriber.
    pub fn remove_external(&self, key: &str) -> Result<()> {
        self.write(None, key, None)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner.lock().map_err(|_| MediumError::Poisoned)
    }

    fn write(&self, writer: Option<u64>, key: &str, value: Option<String>) -> Result<()> {
        let mut inner = self.lock()?;
        let old_value = match &value {
            Some(v) => inner.values.insert(key.to_string(), v.clone()),
            None => inner.values.remove(key),
        };

        let change = StorageChange {
            key: key.to_string(),
            old_value,
            new_value: value,
        };

        // Closed receivers are pruned here rather than on drop.
        inner.subscribers.retain(|sub| {
            if sub.key != key || Some(sub.handle) == writer {
                return !sub.tx.is_closed();
            }
            sub.tx.send(change.clone()).is_ok()
        });

        debug!(key, writer = ?writer, "memory medium write");
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

/// One participant's handle onto a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryMedium {
    store: MemoryStore,
    handle: u64,
}

impl MemoryMedium {
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

impl SharedMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.store.lock()?.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.store
            .write(Some(self.handle), key, Some(value.to_string()))
    }

    fn subscribe(&self, key: &str) -> Result<Subscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.store.lock()?.subscribers.push(Subscriber {
            handle: self.handle,
            key: key.to_string(),
            tx,
        });
        Ok(Subscription::new(rx))
    }
}
