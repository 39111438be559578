//! Clonable controller handle
//!
//! `SheetController` is the surface handed to application code: a cheap
//! clonable handle over the shared engine, exposing the imperative operations
//! and read-only snapshots while keeping mutation behind the engine lock.

use std::sync::{Arc, Mutex};

use snapsheet_animation::Easing;
use snapsheet_core::{Result, Snap, SnapSpec};

use crate::config::SheetConfig;
use crate::engine::SheetEngine;
use crate::extent::{Listener, ListenerId};
use crate::snapshot::SheetState;

/// Shared, lockable engine handle
pub type SharedSheetEngine = Arc<Mutex<SheetEngine>>;

/// Clonable imperative handle to a sheet engine
///
/// Every animated operation returns `bool`: `false` means the sheet is not
/// laid out yet and the call was silently absorbed.
#[derive(Clone)]
pub struct SheetController {
    engine: SharedSheetEngine,
}

impl SheetController {
    /// Build a controller and its engine from a configuration
    pub fn new(config: SheetConfig) -> Result<Self> {
        Ok(Self {
            engine: Arc::new(Mutex::new(SheetEngine::new(config)?)),
        })
    }

    /// Wrap an already-shared engine
    pub fn from_engine(engine: SharedSheetEngine) -> Self {
        Self { engine }
    }

    /// The shared engine behind this controller
    pub fn engine(&self) -> SharedSheetEngine {
        Arc::clone(&self.engine)
    }

    /// Capture the current snapshot
    pub fn state(&self) -> SheetState {
        self.engine.lock().unwrap().state()
    }

    pub fn is_laid_out(&self) -> bool {
        self.engine.lock().unwrap().is_laid_out()
    }

    /// Animate to a configured snap
    pub fn snap_to(&self, snap: &Snap, duration_ms: Option<u32>) -> bool {
        self.engine.lock().unwrap().snap_to(snap, duration_ms)
    }

    /// Animate to a normalized extent in `[0, 1]`
    pub fn snap_to_extent(&self, extent: f32, duration_ms: Option<u32>) -> bool {
        self.engine.lock().unwrap().snap_to_extent(extent, duration_ms)
    }

    /// Animate the content scroll offset
    pub fn scroll_to(&self, offset: f32, duration_ms: Option<u32>, easing: Option<Easing>) -> bool {
        self.engine.lock().unwrap().scroll_to(offset, duration_ms, easing)
    }

    /// Animate to the maximum extent
    pub fn expand(&self) -> bool {
        self.engine.lock().unwrap().expand()
    }

    /// Animate to the minimum extent; a dismissable modal sheet dismisses
    pub fn collapse(&self) -> bool {
        self.engine.lock().unwrap().collapse()
    }

    /// Bring a hidden sheet back to its minimum extent
    pub fn show(&self) -> bool {
        self.engine.lock().unwrap().show()
    }

    /// Animate a shown sheet fully off screen
    pub fn hide(&self) -> bool {
        self.engine.lock().unwrap().hide()
    }

    /// Programmatic re-settle, as if a drag had been released
    pub fn imitate_fling(&self, velocity_extent: f32) -> bool {
        self.engine.lock().unwrap().imitate_fling(velocity_extent)
    }

    /// Request a fresh layout pass and re-settle once it completes
    pub fn rebuild(&self) {
        self.engine.lock().unwrap().rebuild();
    }

    /// Replace the snap spec wholesale
    pub fn replace_spec(&self, snap_spec: SnapSpec) -> Result<()> {
        self.engine.lock().unwrap().replace_spec(snap_spec)
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self, listener: Listener) -> ListenerId {
        self.engine.lock().unwrap().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.engine.lock().unwrap().unsubscribe(id);
    }

    /// Advance animations by delta time; returns true while anything moves
    pub fn tick(&self, dt_ms: f32) -> bool {
        self.engine.lock().unwrap().tick(dt_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapsheet_core::{SnapPositioning, SnapSpec};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn controller_with(values: &[f32]) -> SheetController {
        let spec = SnapSpec::new(
            SnapPositioning::RelativeToAvailableSpace,
            values.iter().map(|v| Snap::Value(*v)),
        );
        let controller = SheetController::new(SheetConfig::persistent(spec)).unwrap();
        controller
            .engine()
            .lock()
            .unwrap()
            .update_measurements(1200.0, 0.0, 0.0, 1000.0);
        controller
    }

    fn settle(controller: &SheetController) {
        for _ in 0..200 {
            if !controller.tick(16.0) {
                return;
            }
        }
        panic!("animation did not settle");
    }

    #[test]
    fn test_clones_share_one_engine() {
        let a = controller_with(&[0.2, 0.9]);
        let b = a.clone();

        assert!(a.expand());
        settle(&a);
        assert!(b.state().is_expanded);
    }

    #[test]
    fn test_snap_to_configured_snap() {
        let controller = controller_with(&[0.2, 0.9]);
        assert!(controller.snap_to(&Snap::Value(0.9), Some(0)));
        settle(&controller);
        assert!((controller.state().extent - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_listener_survives_clone_drop() {
        let hits = Arc::new(AtomicUsize::new(0));
        let controller = controller_with(&[0.2, 0.9]);
        let counter = Arc::clone(&hits);
        {
            let clone = controller.clone();
            clone.subscribe(Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }
        controller.snap_to_extent(0.9, Some(0));
        settle(&controller);
        assert!(hits.load(Ordering::SeqCst) > 0);
    }
}
