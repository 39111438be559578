//! Drag/scroll gesture coordination
//!
//! Bridges one continuous pointer gesture to the two continuous quantities it
//! may move: the sheet extent and the content scroll offset. Every incoming
//! delta is routed by a pure decision function; releasing the gesture
//! resolves a settle target from the release velocity and animates toward it.
//!
//! # State machine
//!
//! - **Idle**: no pointer down, no animation running
//! - **Dragging**: pointer down, consuming deltas
//! - **Animating**: a settle animation is in flight; new pointer input
//!   cancels it and returns to Dragging

use std::sync::{Arc, Mutex, Weak};

use snapsheet_animation::{AnimationScheduler, Easing, Tween, TweenId};
use snapsheet_core::events::event_types;
use snapsheet_core::StateTransitions;

use crate::extent::SheetExtent;

// ============================================================================
// Tunable constants
// ============================================================================

/// Release speed (extent units per second) above which the settle target is
/// the next snap in the direction of travel instead of the nearest one
pub const FLING_EXTENT_VELOCITY: f32 = 0.8;

/// Collapse speed (extent units per second) past which a modal sheet is
/// dismissed to extent 0 instead of settling at its minimum snap
pub const DISMISS_EXTENT_VELOCITY: f32 = 0.8;

/// A modal sheet dragged below this fraction of its minimum extent is
/// dismissed even without dismiss velocity
pub const DISMISS_DISTANCE_FACTOR: f32 = 0.5;

/// Smoothing factor for the exponential moving average of drag velocity
const VELOCITY_SMOOTHING: f32 = 0.3;

/// Two snaps closer than this count as the same settle candidate
const SNAP_EPSILON: f32 = 1e-4;

// ============================================================================
// Gesture phase FSM
// ============================================================================

/// Phase of the current interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Animating,
}

impl StateTransitions for DragPhase {
    fn on_event(&self, event: u32) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (DragPhase::Idle, POINTER_DOWN) => Some(DragPhase::Dragging),
            (DragPhase::Animating, POINTER_DOWN) => Some(DragPhase::Dragging),
            (DragPhase::Dragging, POINTER_UP) => Some(DragPhase::Animating),
            (DragPhase::Idle, ANIMATE) => Some(DragPhase::Animating),
            (DragPhase::Dragging, ANIMATE) => Some(DragPhase::Animating),
            (DragPhase::Animating, SETTLED) => Some(DragPhase::Idle),
            _ => None,
        }
    }
}

// ============================================================================
// Delta routing
// ============================================================================

/// Which continuous quantity absorbs a movement delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaTarget {
    /// Delta resizes the sheet
    Extent,
    /// Delta moves the content scroll offset
    Scroll,
}

/// Decide which quantity absorbs a movement delta
///
/// `delta` is pixels, positive when the pointer moves downward. Until the
/// sheet is fully expanded every delta resizes it; once expanded, deltas feed
/// the scroll offset except when dragging down with the content already at
/// its top, which starts collapsing the sheet again.
pub fn route_delta(at_max_extent: bool, delta: f32, at_top: bool, at_bottom: bool) -> DeltaTarget {
    if !at_max_extent {
        DeltaTarget::Extent
    } else if delta < 0.0 && !at_bottom {
        DeltaTarget::Scroll
    } else if delta > 0.0 && at_top {
        DeltaTarget::Extent
    } else {
        DeltaTarget::Scroll
    }
}

// ============================================================================
// Settle plan
// ============================================================================

/// An in-flight two-phase settle: return scroll to top, then move the extent
struct SettlePlan {
    scroll_tween: Option<TweenId>,
    extent_tween: Option<TweenId>,
    target_extent: f32,
    extent_duration_ms: u32,
    easing: Easing,
}

// ============================================================================
// Coordinator
// ============================================================================

/// Bridges pointer gestures and scroll events to the sheet extent
pub struct DragScrollCoordinator {
    phase: DragPhase,
    settle: Option<SettlePlan>,
    /// Smoothed drag velocity in pixels per second, positive downward
    velocity_px: f32,
    last_drag_time_ms: Option<f64>,
    /// Weak reference to the scheduler driving settle tweens
    scheduler: Weak<Mutex<AnimationScheduler>>,
}

impl Default for DragScrollCoordinator {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
            settle: None,
            velocity_px: 0.0,
            last_drag_time_ms: None,
            scheduler: Weak::new(),
        }
    }
}

impl DragScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the animation scheduler driving settle tweens
    pub fn set_scheduler(&mut self, scheduler: &Arc<Mutex<AnimationScheduler>>) {
        self.scheduler = Arc::downgrade(scheduler);
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether a settle animation is in flight
    pub fn is_animating(&self) -> bool {
        self.phase == DragPhase::Animating
    }

    fn dispatch(&mut self, event: u32) {
        if let Some(next) = self.phase.on_event(event) {
            tracing::trace!("drag phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
    }

    // =========================================================================
    // Gesture surface
    // =========================================================================

    /// Pointer went down on the sheet; cancels any in-flight settle
    ///
    /// No-op before the first layout pass: deltas against unmeasured extents
    /// are meaningless.
    pub fn drag_start(&mut self, extent: &SheetExtent) -> bool {
        if !extent.is_laid_out() {
            return false;
        }
        self.cancel_settle();
        self.velocity_px = 0.0;
        self.last_drag_time_ms = None;
        self.dispatch(event_types::POINTER_DOWN);
        self.phase == DragPhase::Dragging
    }

    /// Consume one incremental movement delta (pixels, positive downward)
    pub fn drag_update(&mut self, extent: &mut SheetExtent, delta: f32) {
        if !extent.is_laid_out() || self.phase != DragPhase::Dragging {
            return;
        }
        self.apply_delta(extent, delta);
    }

    /// Consume a timed movement delta, tracking release velocity
    ///
    /// For input sources that do not report velocity on release. The velocity
    /// is smoothed with an exponential moving average; `drag_end` may then be
    /// called with the tracked velocity.
    pub fn drag_update_timed(&mut self, extent: &mut SheetExtent, delta: f32, now_ms: f64) {
        if !extent.is_laid_out() || self.phase != DragPhase::Dragging {
            return;
        }
        if let Some(last) = self.last_drag_time_ms {
            let dt = ((now_ms - last) / 1000.0) as f32;
            if dt > 0.0 && dt < 0.5 {
                let instant = delta / dt;
                self.velocity_px =
                    self.velocity_px * (1.0 - VELOCITY_SMOOTHING) + instant * VELOCITY_SMOOTHING;
            }
        } else {
            // First sample: assume one 60fps frame
            self.velocity_px = delta * 60.0;
        }
        self.last_drag_time_ms = Some(now_ms);
        self.apply_delta(extent, delta);
    }

    fn apply_delta(&mut self, extent: &mut SheetExtent, delta: f32) {
        let target = route_delta(
            extent.at_max_extent(),
            delta,
            extent.is_at_top(),
            extent.is_at_bottom(),
        );
        tracing::trace!(?target, delta, "routing drag delta");
        match target {
            DeltaTarget::Extent => {
                // Scroll stays pinned at the top while the sheet resizes
                extent.set_scroll_offset(0.0);
                let available = extent.metrics().available_height;
                let next = (extent.current_extent() - delta / available)
                    .clamp(0.0, extent.max_extent());
                extent.set_extent(next);
            }
            DeltaTarget::Scroll => {
                extent.set_scroll_offset(extent.scroll_offset() - delta);
            }
        }
    }

    /// Pointer released; resolve the settle target and animate toward it
    ///
    /// `velocity_px` is pixels per second, positive downward. Pass `None` to
    /// use the velocity tracked by `drag_update_timed`.
    pub fn drag_end(
        &mut self,
        extent: &mut SheetExtent,
        velocity_px: Option<f32>,
        base_duration_ms: u32,
    ) {
        if !extent.is_laid_out() || self.phase != DragPhase::Dragging {
            return;
        }
        let velocity_px = velocity_px.unwrap_or(self.velocity_px);
        self.last_drag_time_ms = None;

        // Downward pixel velocity collapses the sheet: negative extent velocity
        let velocity_extent = -velocity_px / extent.metrics().available_height;

        self.dispatch(event_types::POINTER_UP);
        let target = self.resolve_settle(extent, velocity_extent);
        tracing::debug!(
            velocity_extent,
            target,
            from = extent.current_extent(),
            "drag released"
        );
        self.begin_settle(extent, target, base_duration_ms, Easing::default());
    }

    /// Programmatic equivalent of a release gesture
    ///
    /// Used when the configuration changes externally and the sheet should
    /// re-settle without user input.
    pub fn imitate_fling(
        &mut self,
        extent: &mut SheetExtent,
        velocity_extent: f32,
        base_duration_ms: u32,
    ) {
        if !extent.is_laid_out() {
            return;
        }
        self.cancel_settle();
        let target = self.resolve_settle(extent, velocity_extent);
        self.dispatch(event_types::ANIMATE);
        self.begin_settle(extent, target, base_duration_ms, Easing::default());
    }

    /// Route an external scroll event (wheel/trackpad) through the same
    /// decision rule as drag deltas
    ///
    /// Ignored while a settle animation is in flight; the animation owns the
    /// extent until it completes.
    pub fn scroll_by(&mut self, extent: &mut SheetExtent, delta: f32) {
        if !extent.is_laid_out() || self.phase == DragPhase::Animating {
            return;
        }
        self.apply_delta(extent, delta);
    }

    // =========================================================================
    // Settle resolution
    // =========================================================================

    /// Resolve a release velocity into the snap the sheet settles at
    ///
    /// Fast releases bias toward the next snap in the direction of travel;
    /// slow releases pick the nearest snap. A modal sheet collapsing with
    /// dismiss velocity, or dragged far below its minimum, resolves to 0.
    fn resolve_settle(&self, extent: &SheetExtent, velocity_extent: f32) -> f32 {
        let current = extent.current_extent();
        let snappings = extent.snappings();
        // The hidden snap of a modal sheet is never a regular candidate
        let candidates = if extent.is_modal() && !snappings.is_empty() && snappings[0] <= 0.0 {
            &snappings[1..]
        } else {
            snappings
        };
        if candidates.is_empty() {
            return current;
        }

        let min = candidates[0];
        let max = candidates[candidates.len() - 1];

        let mut target = if velocity_extent >= FLING_EXTENT_VELOCITY {
            candidates
                .iter()
                .copied()
                .find(|snap| *snap > current + SNAP_EPSILON)
                .unwrap_or(max)
        } else if velocity_extent <= -FLING_EXTENT_VELOCITY {
            candidates
                .iter()
                .rev()
                .copied()
                .find(|snap| *snap < current - SNAP_EPSILON)
                .unwrap_or(min)
        } else {
            candidates
                .iter()
                .copied()
                .min_by(|a, b| {
                    (a - current)
                        .abs()
                        .partial_cmp(&(b - current).abs())
                        .expect("snap extents are never NaN")
                })
                .unwrap_or(current)
        };

        if extent.is_modal() && target <= min + SNAP_EPSILON {
            let fast_dismiss = velocity_extent <= -DISMISS_EXTENT_VELOCITY;
            let dragged_past = current < min * DISMISS_DISTANCE_FACTOR;
            if fast_dismiss || dragged_past {
                target = 0.0;
            }
        }

        target
    }

    // =========================================================================
    // Settle animation
    // =========================================================================

    /// Animate the extent to `target`, returning scroll to the top first when
    /// the content is scrolled and the sheet is leaving its maximum extent
    ///
    /// Each phase of a two-phase settle runs at half the base duration. With
    /// no scheduler available the settle is applied instantly, mirroring the
    /// no-scheduler fallback of the animation-driven scroll physics.
    pub fn begin_settle(
        &mut self,
        extent: &mut SheetExtent,
        target: f32,
        base_duration_ms: u32,
        easing: Easing,
    ) {
        self.cancel_settle();
        if self.phase != DragPhase::Animating {
            self.dispatch(event_types::ANIMATE);
        }

        let needs_scroll_return =
            extent.scroll_offset() > 0.0 && target < extent.max_extent() - SNAP_EPSILON;
        let already_there = (extent.current_extent() - target).abs() <= SNAP_EPSILON;

        if already_there && !needs_scroll_return {
            self.dispatch(event_types::SETTLED);
            return;
        }

        let Some(scheduler_arc) = self.scheduler.upgrade() else {
            // No scheduler: resolve instantly
            if needs_scroll_return {
                extent.set_scroll_offset(0.0);
            }
            extent.set_extent(target);
            self.dispatch(event_types::SETTLED);
            return;
        };

        let mut scheduler = scheduler_arc.lock().unwrap();
        let (scroll_duration, extent_duration) = if needs_scroll_return {
            (base_duration_ms / 2, base_duration_ms / 2)
        } else {
            (0, base_duration_ms)
        };

        let scroll_tween = needs_scroll_return.then(|| {
            scheduler.add_tween(Tween::new(
                extent.scroll_offset(),
                0.0,
                scroll_duration,
                easing,
            ))
        });
        // The extent phase starts once scroll has returned to the top
        let extent_tween = if needs_scroll_return {
            None
        } else {
            Some(scheduler.add_tween(Tween::new(
                extent.current_extent(),
                target,
                extent_duration,
                easing,
            )))
        };
        drop(scheduler);

        self.settle = Some(SettlePlan {
            scroll_tween,
            extent_tween,
            target_extent: target,
            extent_duration_ms: extent_duration,
            easing,
        });
    }

    /// Animate only the scroll offset (programmatic `scroll_to`)
    pub fn begin_scroll_animation(
        &mut self,
        extent: &mut SheetExtent,
        offset: f32,
        duration_ms: u32,
        easing: Easing,
    ) {
        self.cancel_settle();
        let offset = offset.clamp(0.0, extent.max_scroll_offset());

        let Some(scheduler_arc) = self.scheduler.upgrade() else {
            extent.set_scroll_offset(offset);
            return;
        };

        if self.phase != DragPhase::Animating {
            self.dispatch(event_types::ANIMATE);
        }
        let mut scheduler = scheduler_arc.lock().unwrap();
        let id = scheduler.add_tween(Tween::new(
            extent.scroll_offset(),
            offset,
            duration_ms,
            easing,
        ));
        drop(scheduler);
        self.settle = Some(SettlePlan {
            scroll_tween: Some(id),
            extent_tween: None,
            target_extent: extent.current_extent(),
            extent_duration_ms: 0,
            easing,
        });
    }

    /// Tear down any in-flight settle tweens
    pub fn cancel_settle(&mut self) {
        let Some(plan) = self.settle.take() else {
            return;
        };
        if let Some(scheduler) = self.scheduler.upgrade() {
            let mut scheduler = scheduler.lock().unwrap();
            if let Some(id) = plan.scroll_tween {
                scheduler.remove_tween(id);
            }
            if let Some(id) = plan.extent_tween {
                scheduler.remove_tween(id);
            }
        }
    }

    /// Apply scheduler-driven tween values to the extent
    ///
    /// Returns true while an interaction or animation is active.
    pub fn tick(&mut self, extent: &mut SheetExtent) -> bool {
        match self.phase {
            DragPhase::Idle => false,
            // Active dragging is driven by deltas, not ticks
            DragPhase::Dragging => true,
            DragPhase::Animating => {
                let Some(scheduler_arc) = self.scheduler.upgrade() else {
                    // Scheduler went away mid-flight: finish instantly
                    if let Some(plan) = self.settle.take() {
                        extent.set_scroll_offset(0.0);
                        extent.set_extent(plan.target_extent);
                    }
                    self.dispatch(event_types::SETTLED);
                    return false;
                };

                let Some(plan) = &mut self.settle else {
                    self.dispatch(event_types::SETTLED);
                    return false;
                };

                let scheduler = scheduler_arc.lock().unwrap();

                if let Some(id) = plan.scroll_tween {
                    if let Some(tween) = scheduler.get_tween(id) {
                        let value = tween.value();
                        let finished = tween.is_finished();
                        drop(scheduler);
                        extent.set_scroll_offset(value);
                        if !finished {
                            return true;
                        }
                        // Scroll phase done; hand over to the extent phase
                        let mut scheduler = scheduler_arc.lock().unwrap();
                        scheduler.remove_tween(id);
                        plan.scroll_tween = None;
                        if (extent.current_extent() - plan.target_extent).abs() > SNAP_EPSILON
                            && plan.extent_duration_ms > 0
                        {
                            plan.extent_tween = Some(scheduler.add_tween(Tween::new(
                                extent.current_extent(),
                                plan.target_extent,
                                plan.extent_duration_ms,
                                plan.easing,
                            )));
                            return true;
                        }
                        drop(scheduler);
                        let target = plan.target_extent;
                        self.settle = None;
                        extent.set_extent(target);
                        self.dispatch(event_types::SETTLED);
                        return false;
                    }
                    // Tween vanished; treat as settled
                    plan.scroll_tween = None;
                }

                if let Some(id) = plan.extent_tween {
                    if let Some(tween) = scheduler.get_tween(id) {
                        let value = tween.value();
                        let finished = tween.is_finished();
                        drop(scheduler);
                        extent.set_extent(value);
                        if !finished {
                            return true;
                        }
                        let mut scheduler = scheduler_arc.lock().unwrap();
                        scheduler.remove_tween(id);
                    }
                }

                self.settle = None;
                self.dispatch(event_types::SETTLED);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapsheet_core::{Snap, SnapPositioning, SnapSpec};

    fn extent_with(values: &[f32], modal: bool) -> SheetExtent {
        let spec = SnapSpec::new(
            SnapPositioning::RelativeToAvailableSpace,
            values.iter().map(|v| Snap::Value(*v)),
        );
        let mut extent = SheetExtent::new(spec, modal, 0.0);
        extent.update_measurements(1200.0, 0.0, 0.0, 1000.0);
        extent
    }

    fn shared_scheduler() -> Arc<Mutex<AnimationScheduler>> {
        Arc::new(Mutex::new(AnimationScheduler::new()))
    }

    // -------------------------------------------------------------------------
    // Routing
    // -------------------------------------------------------------------------

    #[test]
    fn test_route_all_deltas_to_extent_below_max() {
        for delta in [-30.0, 30.0] {
            for at_top in [true, false] {
                for at_bottom in [true, false] {
                    assert_eq!(
                        route_delta(false, delta, at_top, at_bottom),
                        DeltaTarget::Extent
                    );
                }
            }
        }
    }

    #[test]
    fn test_route_at_max_extent() {
        // Dragging content up with room left below: scroll
        assert_eq!(route_delta(true, -10.0, true, false), DeltaTarget::Scroll);
        // Dragging down at scroll top: sheet collapses
        assert_eq!(route_delta(true, 10.0, true, false), DeltaTarget::Extent);
        // Dragging down while scrolled into the content: scroll back up
        assert_eq!(route_delta(true, 10.0, false, false), DeltaTarget::Scroll);
        // Dragging up at the content bottom: clamped scroll
        assert_eq!(route_delta(true, -10.0, true, true), DeltaTarget::Scroll);
    }

    // -------------------------------------------------------------------------
    // Drag sequences
    // -------------------------------------------------------------------------

    #[test]
    fn test_drag_resizes_sheet_without_scrolling() {
        let mut extent = extent_with(&[0.2, 0.5, 0.9], false);
        extent.set_extent(0.5);
        extent.set_scroll_metrics(0.0, 600.0);
        let mut coordinator = DragScrollCoordinator::new();

        assert!(coordinator.drag_start(&extent));
        // Drag up 100px: extent grows by 0.1, scroll untouched
        coordinator.drag_update(&mut extent, -100.0);
        assert!((extent.current_extent() - 0.6).abs() < 1e-6);
        assert_eq!(extent.scroll_offset(), 0.0);

        coordinator.drag_update(&mut extent, 50.0);
        assert!((extent.current_extent() - 0.55).abs() < 1e-6);
        assert_eq!(extent.scroll_offset(), 0.0);
    }

    #[test]
    fn test_drag_scrolls_content_at_max_extent() {
        let mut extent = extent_with(&[0.2, 0.9], false);
        extent.set_extent(0.9);
        extent.set_scroll_metrics(0.0, 600.0);
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        coordinator.drag_update(&mut extent, -120.0);
        assert_eq!(extent.scroll_offset(), 120.0);
        assert!((extent.current_extent() - 0.9).abs() < 1e-6);

        // Drag back down past the top: first unscrolls, then would collapse
        coordinator.drag_update(&mut extent, 120.0);
        assert_eq!(extent.scroll_offset(), 0.0);
        coordinator.drag_update(&mut extent, 100.0);
        assert!((extent.current_extent() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_interactive_drag_never_goes_below_zero() {
        let mut extent = extent_with(&[0.2, 0.9], false);
        extent.set_extent(0.2);
        let mut coordinator = DragScrollCoordinator::new();
        coordinator.drag_start(&extent);
        coordinator.drag_update(&mut extent, 5000.0);
        assert_eq!(extent.current_extent(), 0.0);
    }

    #[test]
    fn test_drag_before_layout_is_noop() {
        let spec = SnapSpec::new(
            SnapPositioning::RelativeToAvailableSpace,
            [Snap::Value(0.2), Snap::Value(0.9)],
        );
        let mut extent = SheetExtent::new(spec, false, 0.0);
        let mut coordinator = DragScrollCoordinator::new();

        assert!(!coordinator.drag_start(&extent));
        coordinator.drag_update(&mut extent, -100.0);
        coordinator.drag_end(&mut extent, Some(-500.0), 400);
        assert_eq!(extent.current_extent(), 0.0);
        assert_eq!(coordinator.phase(), DragPhase::Idle);
    }

    // -------------------------------------------------------------------------
    // Settle resolution
    // -------------------------------------------------------------------------

    #[test]
    fn test_fling_up_biases_to_next_higher_snap() {
        let mut extent = extent_with(&[0.2, 0.5, 0.9], false);
        extent.set_extent(0.4);
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        // 1200 px/s upward = 1.2 extent/s, above the fling threshold
        coordinator.drag_end(&mut extent, Some(-1200.0), 0);
        coordinator.tick(&mut extent);
        assert!((extent.current_extent() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fling_down_biases_to_next_lower_snap() {
        let mut extent = extent_with(&[0.2, 0.5, 0.9], false);
        extent.set_extent(0.45);
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        coordinator.drag_end(&mut extent, Some(1200.0), 0);
        coordinator.tick(&mut extent);
        assert!((extent.current_extent() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_slow_release_picks_nearest_snap() {
        let mut extent = extent_with(&[0.2, 0.5, 0.9], false);
        extent.set_extent(0.42);
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        coordinator.drag_end(&mut extent, Some(-50.0), 0);
        coordinator.tick(&mut extent);
        assert!((extent.current_extent() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fling_past_last_snap_clamps_to_boundary() {
        let mut extent = extent_with(&[0.2, 0.5, 0.9], false);
        extent.set_extent(0.9);
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        coordinator.drag_end(&mut extent, Some(-2000.0), 0);
        coordinator.tick(&mut extent);
        assert!((extent.current_extent() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_modal_dismiss_on_fast_downward_fling() {
        let mut extent = extent_with(&[0.6], true);
        extent.set_extent(0.6);
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        coordinator.drag_end(&mut extent, Some(1500.0), 0);
        coordinator.tick(&mut extent);
        assert_eq!(extent.current_extent(), 0.0);
    }

    #[test]
    fn test_modal_dismiss_when_dragged_far_below_min() {
        let mut extent = extent_with(&[0.6], true);
        extent.set_extent(0.2); // below 0.6 * DISMISS_DISTANCE_FACTOR
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        coordinator.drag_end(&mut extent, Some(0.0), 0);
        coordinator.tick(&mut extent);
        assert_eq!(extent.current_extent(), 0.0);
    }

    #[test]
    fn test_modal_slow_release_near_min_stays_shown() {
        let mut extent = extent_with(&[0.6], true);
        extent.set_extent(0.5);
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        coordinator.drag_end(&mut extent, Some(0.0), 0);
        coordinator.tick(&mut extent);
        assert!((extent.current_extent() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_persistent_sheet_never_resolves_to_hidden() {
        let mut extent = extent_with(&[0.2, 0.9], false);
        extent.set_extent(0.05);
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        coordinator.drag_end(&mut extent, Some(3000.0), 0);
        coordinator.tick(&mut extent);
        assert!((extent.current_extent() - 0.2).abs() < 1e-6);
    }

    // -------------------------------------------------------------------------
    // Settle animation
    // -------------------------------------------------------------------------

    #[test]
    fn test_settle_animates_through_scheduler() {
        let scheduler = shared_scheduler();
        let mut extent = extent_with(&[0.2, 0.9], false);
        extent.set_extent(0.4);
        let mut coordinator = DragScrollCoordinator::new();
        coordinator.set_scheduler(&scheduler);

        coordinator.drag_start(&extent);
        coordinator.drag_end(&mut extent, Some(-50.0), 200);
        assert_eq!(coordinator.phase(), DragPhase::Animating);

        // Half the duration: part way down toward 0.2
        scheduler.lock().unwrap().tick(100.0);
        assert!(coordinator.tick(&mut extent));
        assert!(extent.current_extent() < 0.4);
        assert!(extent.current_extent() > 0.2);

        scheduler.lock().unwrap().tick(150.0);
        assert!(!coordinator.tick(&mut extent));
        assert!((extent.current_extent() - 0.2).abs() < 1e-6);
        assert_eq!(coordinator.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_two_phase_settle_returns_scroll_first() {
        let scheduler = shared_scheduler();
        let mut extent = extent_with(&[0.2, 0.9], false);
        extent.set_extent(0.9);
        extent.set_scroll_metrics(300.0, 600.0);
        let mut coordinator = DragScrollCoordinator::new();
        coordinator.set_scheduler(&scheduler);

        coordinator.imitate_fling(&mut extent, -1.0, 400);

        // Phase one: scroll returns to top, extent untouched
        scheduler.lock().unwrap().tick(100.0);
        assert!(coordinator.tick(&mut extent));
        assert!(extent.scroll_offset() < 300.0);
        assert!((extent.current_extent() - 0.9).abs() < 1e-6);

        scheduler.lock().unwrap().tick(110.0);
        assert!(coordinator.tick(&mut extent));
        assert_eq!(extent.scroll_offset(), 0.0);

        // Phase two: extent moves over the remaining half duration
        scheduler.lock().unwrap().tick(100.0);
        assert!(coordinator.tick(&mut extent));
        assert!(extent.current_extent() < 0.9);

        scheduler.lock().unwrap().tick(150.0);
        assert!(!coordinator.tick(&mut extent));
        assert!((extent.current_extent() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_no_scheduler_settles_instantly() {
        let mut extent = extent_with(&[0.2, 0.9], false);
        extent.set_extent(0.4);
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        coordinator.drag_end(&mut extent, Some(-50.0), 400);
        coordinator.tick(&mut extent);
        assert!((extent.current_extent() - 0.2).abs() < 1e-6);
        assert_eq!(coordinator.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_new_pointer_down_cancels_animation() {
        let scheduler = shared_scheduler();
        let mut extent = extent_with(&[0.2, 0.9], false);
        extent.set_extent(0.4);
        let mut coordinator = DragScrollCoordinator::new();
        coordinator.set_scheduler(&scheduler);

        coordinator.drag_start(&extent);
        coordinator.drag_end(&mut extent, Some(-50.0), 400);
        assert_eq!(coordinator.phase(), DragPhase::Animating);
        assert_eq!(scheduler.lock().unwrap().tween_count(), 1);

        // Grab mid-flight: tween torn down, back to dragging
        coordinator.drag_start(&extent);
        assert_eq!(coordinator.phase(), DragPhase::Dragging);
        assert_eq!(scheduler.lock().unwrap().tween_count(), 0);
    }

    #[test]
    fn test_velocity_tracking_from_timed_deltas() {
        let mut extent = extent_with(&[0.2, 0.5, 0.9], false);
        extent.set_extent(0.4);
        let mut coordinator = DragScrollCoordinator::new();

        coordinator.drag_start(&extent);
        // Steady upward drag at ~1250 px/s
        let mut now = 0.0;
        for _ in 0..8 {
            coordinator.drag_update_timed(&mut extent, -20.0, now);
            now += 16.0;
        }
        coordinator.drag_end(&mut extent, None, 0);
        coordinator.tick(&mut extent);
        // Tracked fling velocity carries the sheet to the next snap up
        assert!((extent.current_extent() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_scroll_by_ignored_while_animating() {
        let scheduler = shared_scheduler();
        let mut extent = extent_with(&[0.2, 0.9], false);
        extent.set_extent(0.9);
        extent.set_scroll_metrics(0.0, 600.0);
        let mut coordinator = DragScrollCoordinator::new();
        coordinator.set_scheduler(&scheduler);

        coordinator.imitate_fling(&mut extent, -1.0, 400);
        coordinator.scroll_by(&mut extent, -100.0);
        assert_eq!(extent.scroll_offset(), 0.0);
    }
}
