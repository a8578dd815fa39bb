//! One participant's membership in the shared window set.
//!
//! The registry keeps a local copy of the snapshot stored on the medium.
//! Local geometry drift is written back as a whole-record replacement;
//! other participants' writes arrive through the medium subscription and
//! replace the local copy. There is no locking: concurrent writers race and
//! the last whole-record write wins until someone writes again.
//!
//! The registry owns no timer. The host calls
//! [`WindowRegistry::process_remote_changes`] and
//! [`WindowRegistry::report_shape_if_changed`] on its own cadence, and
//! [`WindowRegistry::depart`] once on teardown. Departure is best effort:
//! if the process dies before the write lands, the stale descriptor stays
//! on the medium until another participant happens to rewrite the record.

mod diff;
mod types;


pub use types::{Callback, Presence, RegistryKeys};

use serde_json::Value;
use tracing::{debug, info, warn};
use winsync_common::{RegistryError, Snapshot, WindowDescriptor, WindowId};

use crate::geometry::GeometrySource;
use crate::medium::{SharedMedium, Subscription};

use diff::windows_changed;

pub type Result<T> = std::result::Result<T, RegistryError>;

pub struct WindowRegistry<M, G> {
    medium: M,
    geometry: G,
    keys: RegistryKeys,
    subscription: Subscription,
    presence: Presence,
    /// Last known snapshot, shared record as this participant sees it.
    windows: Snapshot,
    /// Own descriptor, including the last published shape.
    this_window: Option<WindowDescriptor>,
    on_shape_change: Option<Callback>,
    on_windows_change: Option<Callback>,
}

impl<M: SharedMedium, G: GeometrySource> WindowRegistry<M, G> {
    /// Create a registry on the default `count` / `windows` keys.
    ///
    /// Subscribes immediately, so writes made before [`init`](Self::init)
    /// are not missed.
    pub fn new(medium: M, geometry: G) -> Result<Self> {
        Self::with_keys(medium, geometry, RegistryKeys::default())
    }

    pub fn with_keys(medium: M, geometry: G, keys: RegistryKeys) -> Result<Self> {
        let subscription = medium.subscribe(&keys.windows)?;
        Ok(Self {
            medium,
            geometry,
            keys,
            subscription,
            presence: Presence::Detached,
            windows: Vec::new(),
            this_window: None,
            on_shape_change: None,
            on_windows_change: None,
        })
    }

    /// Join the shared window set.
    ///
    /// Allocates the next id from the shared counter, appends a descriptor
    /// with the current geometry and `meta_data`, and writes the counter and
    /// then the snapshot back. Only one join per registry.
    pub fn init(&mut self, meta_data: Value) -> Result<WindowId> {
        if let Presence::Joined(id) | Presence::Departed(id) = self.presence {
            return Err(RegistryError::AlreadyJoined(id));
        }

        // Anything queued so far predates the read below.
        let mut stale = 0usize;
        while self.subscription.try_next().is_some() {
            stale += 1;
        }
        if stale > 0 {
            debug!(stale, "discarded window notifications queued before init");
        }

        let mut windows = self.read_snapshot()?;
        let counter = self.read_counter(&windows)?;
        let shape = self.geometry.current_shape()?;
        let id = WindowId(counter + 1);

        let descriptor = WindowDescriptor {
            id,
            shape,
            meta_data,
        };
        windows.push(descriptor.clone());

        self.medium.set(&self.keys.counter, &id.0.to_string())?;
        self.presence = Presence::Joined(id);
        self.windows = windows;
        self.this_window = Some(descriptor);
        self.persist()?;

        info!(%id, windows = self.windows.len(), "window joined");
        Ok(id)
    }

    /// Publish the current geometry if it moved since the last report.
    ///
    /// Returns `true` when a change was written and the shape callback ran.
    pub fn report_shape_if_changed(&mut self) -> Result<bool> {
        let id = self.joined_id("report_shape_if_changed")?;
        let shape = self.geometry.current_shape()?;

        let previous = self
            .this_window
            .as_ref()
            .map(|w| w.shape)
            .ok_or(RegistryError::SelfNotFound(id))?;
        if !shape.differs_from(&previous) {
            return Ok(false);
        }

        let index = self
            .window_index(id)
            .ok_or(RegistryError::SelfNotFound(id))?;
        self.windows[index].shape = shape;
        if let Some(this_window) = self.this_window.as_mut() {
            this_window.shape = shape;
        }
        self.persist()?;

        debug!(%id, x = shape.x, y = shape.y, w = shape.w, h = shape.h, "window shape changed");
        if let Some(callback) = self.on_shape_change.as_mut() {
            callback();
        }
        Ok(true)
    }

    /// Apply a snapshot written by another participant.
    ///
    /// `None` means the key was removed and reads as an empty snapshot.
    /// Malformed input is logged and ignored, leaving the cache untouched.
    /// The cache is always replaced on valid input; the windows callback
    /// runs only when membership (count or positional ids) changed.
    /// Returns whether membership changed.
    pub fn on_remote_change(&mut self, new_value: Option<&str>) -> bool {
        let incoming: Snapshot = match new_value {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str(raw) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("ignoring malformed window snapshot: {e}");
                    return false;
                }
            },
        };

        let changed = windows_changed(&self.windows, &incoming);
        self.windows = incoming;

        if changed {
            debug!(windows = self.windows.len(), "window membership changed");
            if let Some(callback) = self.on_windows_change.as_mut() {
                callback();
            }
        }
        changed
    }

    /// Drain pending medium notifications for the snapshot key.
    ///
    /// Returns how many of them changed membership.
    pub fn process_remote_changes(&mut self) -> usize {
        let mut membership_changes = 0;
        while let Some(change) = self.subscription.try_next() {
            if change.key != self.keys.windows {
                continue;
            }
            if self.on_remote_change(change.new_value.as_deref()) {
                membership_changes += 1;
            }
        }
        membership_changes
    }

    /// Leave the shared window set.
    ///
    /// The participant counts as departed even if the final write fails;
    /// the error is returned for logging only.
    pub fn depart(&mut self) -> Result<()> {
        let id = self.joined_id("depart")?;
        self.presence = Presence::Departed(id);
        self.this_window = None;
        self.windows.retain(|w| w.id != id);
        self.persist()?;

        info!(%id, windows = self.windows.len(), "window departed");
        Ok(())
    }

    /// The cached snapshot.
    pub fn windows(&self) -> &[WindowDescriptor] {
        &self.windows
    }

    pub fn this_window(&self) -> Result<&WindowDescriptor> {
        let id = self.joined_id("this_window")?;
        self.this_window
            .as_ref()
            .ok_or(RegistryError::SelfNotFound(id))
    }

    pub fn this_window_id(&self) -> Option<WindowId> {
        match self.presence {
            Presence::Joined(id) => Some(id),
            _ => None,
        }
    }

    /// Position of `id` in the cached snapshot.
    pub fn window_index(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn keys(&self) -> &RegistryKeys {
        &self.keys
    }

    /// Replace the shape-change hook.
    pub fn set_shape_change_callback(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_shape_change = Some(Box::new(callback));
    }

    /// Replace the membership-change hook.
    pub fn set_windows_change_callback(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_windows_change = Some(Box::new(callback));
    }

    fn joined_id(&self, operation: &'static str) -> Result<WindowId> {
        match self.presence {
            Presence::Joined(id) => Ok(id),
            _ => Err(RegistryError::NotJoined(operation)),
        }
    }

    fn read_snapshot(&self) -> Result<Snapshot> {
        let Some(raw) = self.medium.get(&self.keys.windows)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                warn!("malformed window snapshot on medium, starting empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Last allocated id. Never lower than the highest id already present.
    fn read_counter(&self, windows: &[WindowDescriptor]) -> Result<u64> {
        let highest = windows.iter().map(|w| w.id.0).max().unwrap_or(0);
        let stored = match self.medium.get(&self.keys.counter)? {
            None => 0,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(count) => count,
                Err(e) => {
                    warn!(raw = %raw, "malformed window counter, using highest id in snapshot: {e}");
                    highest
                }
            },
        };
        Ok(stored.max(highest))
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.windows)
            .map_err(|e| RegistryError::Encode(e.to_string()))?;
        self.medium.set(&self.keys.windows, &raw)?;
        Ok(())
    }
}
