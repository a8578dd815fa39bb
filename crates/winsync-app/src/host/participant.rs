//! One simulated window: a registry plus the geometry it reports.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use winsync_common::{RegistryError, WindowId, WindowShape};
use winsync_registry::{Presence, RegistryKeys, SharedGeometry, SharedMedium, WindowRegistry};

pub struct Participant<M: SharedMedium> {
    registry: WindowRegistry<M, SharedGeometry>,
    geometry: SharedGeometry,
    windows_changed: Arc<AtomicBool>,
    shape_changed: Arc<AtomicBool>,
}

impl<M: SharedMedium> Participant<M> {
    /// Build a registry on `medium`, hook up change flags, and join.
    pub fn join(
        medium: M,
        keys: RegistryKeys,
        shape: WindowShape,
        meta_data: Value,
    ) -> Result<Self, RegistryError> {
        let geometry = SharedGeometry::new(shape);
        let mut registry = WindowRegistry::with_keys(medium, geometry.clone(), keys)?;

        let windows_changed = Arc::new(AtomicBool::new(false));
        let shape_changed = Arc::new(AtomicBool::new(false));
        {
            let flag = Arc::clone(&windows_changed);
            registry.set_windows_change_callback(move || flag.store(true, Ordering::Relaxed));
        }
        {
            let flag = Arc::clone(&shape_changed);
            registry.set_shape_change_callback(move || flag.store(true, Ordering::Relaxed));
        }

        let id = registry.init(meta_data)?;
        tracing::info!(%id, windows = registry.windows().len(), "Joined window set");

        Ok(Self {
            registry,
            geometry,
            windows_changed,
            shape_changed,
        })
    }

    pub fn id(&self) -> Option<WindowId> {
        self.registry.this_window_id()
    }

    pub fn presence(&self) -> Presence {
        self.registry.presence()
    }

    #[cfg(test)]
    pub fn registry(&self) -> &WindowRegistry<M, SharedGeometry> {
        &self.registry
    }

    /// One host tick: drain remote writes, move by `drift`, publish if moved.
    pub fn tick(&mut self, drift: f64) -> Result<(), RegistryError> {
        self.registry.process_remote_changes();

        if drift != 0.0 {
            self.geometry.update(|shape| shape.x += drift);
        }
        self.registry.report_shape_if_changed()?;

        if self.shape_changed.swap(false, Ordering::Relaxed) {
            let shape = self.registry.this_window()?.shape;
            tracing::debug!(
                id = ?self.id(),
                x = shape.x,
                y = shape.y,
                w = shape.w,
                h = shape.h,
                "Shape published"
            );
        }

        if self.windows_changed.swap(false, Ordering::Relaxed) {
            let ids: Vec<String> = self
                .registry
                .windows()
                .iter()
                .map(|w| w.id.to_string())
                .collect();
            tracing::info!(
                id = ?self.id(),
                count = ids.len(),
                windows = %ids.join(", "),
                "Window set changed"
            );
        }

        Ok(())
    }

    /// Leave the window set, writing back the freshest record we have seen.
    pub fn depart(&mut self) -> Result<(), RegistryError> {
        let id = self.id();
        self.registry.process_remote_changes();
        self.registry.depart()?;
        tracing::info!(?id, "Departed window set");
        Ok(())
    }
}
