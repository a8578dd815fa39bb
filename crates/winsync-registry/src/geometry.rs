//! Geometry-query capability supplied by the host.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;
use winsync_common::{PlatformError, WindowShape};

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Reports where this participant's window currently is.
pub trait GeometrySource {
    fn current_shape(&self) -> Result<WindowShape>;
}

impl<F> GeometrySource for F
where
    F: Fn() -> WindowShape,
{
    fn current_shape(&self) -> Result<WindowShape> {
        Ok(self())
    }
}

/// A settable shape shared between the host and the registry.
///
/// Clones share the same cell, so the host can move the "window" while the
/// registry owns its own handle.
#[derive(Debug, Clone, Default)]
pub struct SharedGeometry {
    shape: Arc<Mutex<WindowShape>>,
}

impl SharedGeometry {
    pub fn new(shape: WindowShape) -> Self {
        Self {
            shape: Arc::new(Mutex::new(shape)),
        }
    }

    pub fn set(&self, shape: WindowShape) {
        *self.lock() = shape;
    }

    /// Apply `f` to the current shape in place.
    pub fn update(&self, f: impl FnOnce(&mut WindowShape)) {
        f(&mut self.lock());
    }

    /// Poisoning is logged and cleared; the shape is plain `Copy` data.
    fn lock(&self) -> MutexGuard<'_, WindowShape> {
        self.shape.lock().unwrap_or_else(|poisoned| {
            warn!("geometry lock poisoned, recovering last shape");
            self.shape.clear_poison();
            poisoned.into_inner()
        })
    }
}

impl GeometrySource for SharedGeometry {
    fn current_shape(&self) -> Result<WindowShape> {
        Ok(*self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_a_geometry_source() {
        let source = || WindowShape::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            source.current_shape().unwrap(),
            WindowShape::new(1.0, 2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn shared_geometry_clones_see_updates() {
        let host = SharedGeometry::new(WindowShape::new(0.0, 0.0, 100.0, 100.0));
        let registry_side = host.clone();

        host.set(WindowShape::new(10.0, 0.0, 100.0, 100.0));
        assert_eq!(registry_side.current_shape().unwrap().x, 10.0);

        host.update(|s| s.h = 50.0);
        assert_eq!(registry_side.current_shape().unwrap().h, 50.0);
    }

    #[test]
    fn shared_geometry_recovers_from_poisoning() {
        let geometry = SharedGeometry::new(WindowShape::new(0.0, 0.0, 100.0, 100.0));
        let poisoner = geometry.clone();
        let _ = std::thread::spawn(move || {
            poisoner.update(|s| {
                s.x = 7.0;
                panic!("host panicked mid-update");
            });
        })
        .join();

        assert_eq!(geometry.current_shape().unwrap().x, 7.0);
        geometry.update(|s| s.y = 3.0);
        geometry.set(WindowShape::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            geometry.current_shape().unwrap(),
            WindowShape::new(1.0, 2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn shared_geometry_default_is_zero() {
        let geometry = SharedGeometry::default();
        assert_eq!(geometry.current_shape().unwrap(), WindowShape::default());
    }
}
