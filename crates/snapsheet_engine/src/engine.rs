//! The sheet engine
//!
//! Typed composition of the extent state and the drag/scroll coordinator.
//! This is the single mutation surface: gestures, layout passes, and the
//! imperative controller all funnel through it. Every imperative operation
//! returns `bool`; `false` means the call was absorbed as a no-op because the
//! sheet is not laid out yet (an expected startup race, never an error).

use std::sync::{Arc, Mutex};

use snapsheet_animation::{AnimationScheduler, Easing};
use snapsheet_core::normalize::denormalize;
use snapsheet_core::{Result, Snap, SnapSpec};

use crate::config::SheetConfig;
use crate::coordinator::{DragPhase, DragScrollCoordinator};
use crate::extent::{Listener, ListenerId, SheetExtent};
use crate::snapshot::SheetState;

/// Extent/scroll coordination engine for one sheet instance
pub struct SheetEngine {
    config: SheetConfig,
    extent: SheetExtent,
    coordinator: DragScrollCoordinator,
    scheduler: Arc<Mutex<AnimationScheduler>>,
    /// Set by `rebuild`; cleared when the next layout pass reports in
    needs_measurement: bool,
    /// Re-settle once fresh measurements arrive
    resettle_after_layout: bool,
}

impl SheetEngine {
    /// Create an engine, validating the configuration eagerly
    pub fn new(config: SheetConfig) -> Result<Self> {
        config.validate()?;
        let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
        let mut extent = SheetExtent::new(
            config.snap_spec.clone(),
            config.modal,
            config.min_content_height,
        );
        extent.set_chrome(config.vertical_padding, config.border_thickness);
        let mut coordinator = DragScrollCoordinator::new();
        coordinator.set_scheduler(&scheduler);
        Ok(Self {
            config,
            extent,
            coordinator,
            scheduler,
            needs_measurement: true,
            resettle_after_layout: false,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn is_laid_out(&self) -> bool {
        self.extent.is_laid_out()
    }

    pub fn current_extent(&self) -> f32 {
        self.extent.current_extent()
    }

    /// Current extent reverse-mapped into the configured coordinate space
    pub fn current_extent_denormalized(&self) -> f32 {
        denormalize(
            self.extent.current_extent(),
            self.config.snap_spec.positioning,
            self.extent.metrics(),
        )
    }

    pub fn phase(&self) -> DragPhase {
        self.coordinator.phase()
    }

    /// Capture the current read-only snapshot
    pub fn state(&self) -> SheetState {
        SheetState::capture(&self.extent)
    }

    /// Scheduler driving settle tweens; share it with the frame loop
    pub fn scheduler(&self) -> Arc<Mutex<AnimationScheduler>> {
        Arc::clone(&self.scheduler)
    }

    /// Whether a layout pass has been requested and not yet delivered
    pub fn needs_measurement(&self) -> bool {
        self.needs_measurement
    }

    // =========================================================================
    // Layout collaborator contract
    // =========================================================================

    /// Deliver measured pixel heights after a layout pass
    ///
    /// Tolerates repeated calls with unchanged or zero values. Completes a
    /// pending `rebuild` by re-settling onto the renormalized snap list.
    pub fn update_measurements(
        &mut self,
        child_height: f32,
        header_height: f32,
        footer_height: f32,
        available_height: f32,
    ) {
        self.extent.update_measurements(
            child_height,
            header_height,
            footer_height,
            available_height,
        );
        self.needs_measurement = false;
        if self.resettle_after_layout && self.extent.is_laid_out() {
            self.resettle_after_layout = false;
            self.coordinator
                .imitate_fling(&mut self.extent, 0.0, self.config.base_duration_ms);
        }
    }

    /// Deliver fresh scroll metrics from the scrollable collaborator
    pub fn update_scroll_metrics(&mut self, offset: f32, max_offset: f32) {
        self.extent.set_scroll_metrics(offset, max_offset);
    }

    // =========================================================================
    // Gesture surface
    // =========================================================================

    pub fn drag_start(&mut self) -> bool {
        self.coordinator.drag_start(&self.extent)
    }

    pub fn drag_update(&mut self, delta: f32) {
        self.coordinator.drag_update(&mut self.extent, delta);
    }

    pub fn drag_update_timed(&mut self, delta: f32, now_ms: f64) {
        self.coordinator
            .drag_update_timed(&mut self.extent, delta, now_ms);
    }

    pub fn drag_end(&mut self, velocity_px: Option<f32>) {
        self.coordinator
            .drag_end(&mut self.extent, velocity_px, self.config.base_duration_ms);
    }

    /// External scroll event (wheel/trackpad), in pixels, positive downward
    pub fn scroll_by(&mut self, delta: f32) {
        self.coordinator.scroll_by(&mut self.extent, delta);
    }

    /// Programmatic re-settle, as if a drag had been released
    pub fn imitate_fling(&mut self, velocity_extent: f32) -> bool {
        if !self.extent.is_laid_out() {
            return false;
        }
        self.coordinator
            .imitate_fling(&mut self.extent, velocity_extent, self.config.base_duration_ms);
        true
    }

    // =========================================================================
    // Imperative surface
    // =========================================================================

    /// Animate to a configured snap
    pub fn snap_to(&mut self, snap: &Snap, duration_ms: Option<u32>) -> bool {
        if !self.extent.is_laid_out() {
            return false;
        }
        let target = snapsheet_core::normalize(
            snap,
            self.config.snap_spec.positioning,
            self.extent.metrics(),
        );
        self.animate_extent_to(target, duration_ms)
    }

    /// Animate to a normalized extent in `[0, 1]`
    ///
    /// Non-finite targets resolve to the safe default `0.0`.
    pub fn snap_to_extent(&mut self, extent: f32, duration_ms: Option<u32>) -> bool {
        if !self.extent.is_laid_out() {
            return false;
        }
        let extent = if extent.is_finite() {
            extent.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.animate_extent_to(extent, duration_ms)
    }

    /// Animate the content scroll offset
    pub fn scroll_to(&mut self, offset: f32, duration_ms: Option<u32>, easing: Option<Easing>) -> bool {
        if !self.extent.is_laid_out() {
            return false;
        }
        self.coordinator.begin_scroll_animation(
            &mut self.extent,
            offset,
            duration_ms.unwrap_or(self.config.base_duration_ms),
            easing.unwrap_or_default(),
        );
        true
    }

    /// Animate to the maximum extent
    pub fn expand(&mut self) -> bool {
        if !self.extent.is_laid_out() {
            return false;
        }
        let target = self.extent.max_extent();
        self.animate_extent_to(target, None)
    }

    /// Animate to the minimum extent; a dismissable modal sheet dismisses
    pub fn collapse(&mut self) -> bool {
        if !self.extent.is_laid_out() {
            return false;
        }
        let target = if self.config.modal && self.config.dismissable {
            0.0
        } else {
            self.extent.min_extent()
        };
        self.animate_extent_to(target, None)
    }

    /// Bring a hidden sheet back to its minimum extent; no-op when shown
    pub fn show(&mut self) -> bool {
        if !self.extent.is_laid_out() || !self.state().is_hidden {
            return false;
        }
        let target = self.extent.min_extent();
        self.animate_extent_to(target, None)
    }

    /// Animate a shown sheet to extent 0; no-op when already hidden
    pub fn hide(&mut self) -> bool {
        if !self.extent.is_laid_out() || self.state().is_hidden {
            return false;
        }
        self.animate_extent_to(0.0, None)
    }

    /// Backdrop tapped behind a modal sheet
    pub fn on_backdrop_tap(&mut self) -> bool {
        if !self.config.modal || !self.config.close_on_backdrop_tap || !self.config.dismissable {
            return false;
        }
        self.hide()
    }

    /// Request a fresh layout pass and re-settle once it completes
    pub fn rebuild(&mut self) {
        self.needs_measurement = true;
        self.resettle_after_layout = true;
    }

    /// Replace the snap spec wholesale
    ///
    /// Renormalizes against current measurements and re-settles the sheet
    /// onto the new snap list.
    pub fn replace_spec(&mut self, snap_spec: SnapSpec) -> Result<()> {
        snap_spec.validate(
            self.config.modal,
            self.config.has_header,
            self.config.has_footer,
        )?;
        self.config.snap_spec = snap_spec.clone();
        self.extent.replace_spec(snap_spec);
        if self.extent.is_laid_out() {
            self.coordinator
                .imitate_fling(&mut self.extent, 0.0, self.config.base_duration_ms);
        }
        Ok(())
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Subscribe to snapshot changes
    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.extent.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.extent.unsubscribe(id);
    }

    // =========================================================================
    // Frame driving
    // =========================================================================

    /// Advance animations by delta time; returns true while anything moves
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        self.scheduler.lock().unwrap().tick(dt_ms);
        self.coordinator.tick(&mut self.extent)
    }

    fn animate_extent_to(&mut self, target: f32, duration_ms: Option<u32>) -> bool {
        self.coordinator.begin_settle(
            &mut self.extent,
            target,
            duration_ms.unwrap_or(self.config.base_duration_ms),
            Easing::default(),
        );
        true
    }
}
