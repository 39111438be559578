//! Sheet extent state holder
//!
//! `SheetExtent` is the single source of truth for how much of the available
//! height the sheet covers. Only the engine mutates it; everything else
//! observes immutable [`SheetState`](crate::snapshot::SheetState) snapshots
//! delivered synchronously on every change.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use snapsheet_core::normalize::normalize;
use snapsheet_core::{SheetMetrics, SnapSpec};

use crate::snapshot::SheetState;

new_key_type! {
    /// Key for a subscribed listener
    pub struct ListenerId;
}

/// Listener callback receiving the latest snapshot
pub type Listener = Box<dyn Fn(&SheetState) + Send>;

/// Normalized snap extents, sorted ascending
pub type Snappings = SmallVec<[f32; 6]>;

/// Tolerance for "resting exactly on a snap" when the sheet is remeasured
pub const SNAP_REST_TOLERANCE: f32 = 0.01;

/// Tolerance below which two normalized snaps collapse into one
const SNAP_DEDUP_TOLERANCE: f32 = 1e-4;

/// Mutable state machine owning the current extent and its snap list
pub struct SheetExtent {
    spec: SnapSpec,
    metrics: SheetMetrics,
    modal: bool,
    min_content_height: f32,
    /// Normalized snap list; for modal sheets index 0 is the hidden state 0.0
    snappings: Snappings,
    current: f32,
    scroll_offset: f32,
    max_scroll_offset: f32,
    listeners: SlotMap<ListenerId, Listener>,
}

impl SheetExtent {
    /// Create the extent state for one sheet instance
    pub fn new(spec: SnapSpec, modal: bool, min_content_height: f32) -> Self {
        let mut extent = Self {
            spec,
            metrics: SheetMetrics::default(),
            modal,
            min_content_height,
            snappings: SmallVec::new(),
            current: 0.0,
            scroll_offset: 0.0,
            max_scroll_offset: 0.0,
            listeners: SlotMap::with_key(),
        };
        extent.renormalize();
        extent
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn spec(&self) -> &SnapSpec {
        &self.spec
    }

    pub fn metrics(&self) -> &SheetMetrics {
        &self.metrics
    }

    pub fn is_modal(&self) -> bool {
        self.modal
    }

    pub fn is_laid_out(&self) -> bool {
        self.metrics.is_laid_out()
    }

    /// Current normalized extent in `[0, 1]`
    pub fn current_extent(&self) -> f32 {
        self.current
    }

    /// Normalized snap list, sorted ascending
    pub fn snappings(&self) -> &[f32] {
        &self.snappings
    }

    /// Smallest extent the sheet rests at while shown
    ///
    /// For modal sheets index 0 of the snap list is the hidden state, so the
    /// minimum is the first snap after it.
    pub fn min_extent(&self) -> f32 {
        let index = usize::from(self.modal);
        self.snappings
            .get(index)
            .or_else(|| self.snappings.first())
            .copied()
            .unwrap_or(0.0)
    }

    /// Largest extent the sheet can settle at
    pub fn max_extent(&self) -> f32 {
        self.snappings.last().copied().unwrap_or(0.0)
    }

    /// Whether the sheet is resting at its maximum extent
    pub fn at_max_extent(&self) -> bool {
        self.current >= self.max_extent() - f32::EPSILON
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn max_scroll_offset(&self) -> f32 {
        self.max_scroll_offset
    }

    /// Whether the scrollable content sits at its top
    pub fn is_at_top(&self) -> bool {
        self.scroll_offset <= 0.0
    }

    /// Whether the scrollable content sits at its bottom
    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset >= self.max_scroll_offset - 0.5
    }

    // =========================================================================
    // Mutation (engine only)
    // =========================================================================

    /// Set the current extent, clamped to `[0, 1]`, notifying listeners
    ///
    /// Non-finite values are dropped; `current` stays a number in `[0, 1]`.
    pub fn set_extent(&mut self, value: f32) {
        if !value.is_finite() {
            tracing::warn!("ignoring non-finite extent {value}");
            return;
        }
        let value = value.clamp(0.0, 1.0);
        if (value - self.current).abs() <= f32::EPSILON {
            return;
        }
        tracing::trace!("extent {:.4} -> {:.4}", self.current, value);
        self.current = value;
        self.notify();
    }

    /// Set the content scroll offset, clamped to `[0, max]`, notifying listeners
    pub fn set_scroll_offset(&mut self, offset: f32) {
        if !offset.is_finite() {
            tracing::warn!("ignoring non-finite scroll offset {offset}");
            return;
        }
        let offset = offset.clamp(0.0, self.max_scroll_offset.max(0.0));
        if (offset - self.scroll_offset).abs() <= f32::EPSILON {
            return;
        }
        self.scroll_offset = offset;
        self.notify();
    }

    /// Delegate fresh scroll metrics from the scrollable collaborator
    pub fn set_scroll_metrics(&mut self, offset: f32, max_offset: f32) {
        let max_offset = max_offset.max(0.0);
        let offset = offset.clamp(0.0, max_offset);
        if (offset - self.scroll_offset).abs() <= f32::EPSILON
            && (max_offset - self.max_scroll_offset).abs() <= f32::EPSILON
        {
            return;
        }
        self.scroll_offset = offset;
        self.max_scroll_offset = max_offset;
        self.notify();
    }

    /// Store fresh measurements and re-normalize every configured snap
    ///
    /// If the available height changed while the extent was resting on a
    /// measurement-dependent snap, the extent is re-pinned to that snap's new
    /// normalized value so the sheet stays visually aligned (a sheet resting
    /// at the header must not jump on device rotation). An extent resting at
    /// a literal fraction keeps that fraction.
    pub fn update_measurements(
        &mut self,
        child_height: f32,
        header_height: f32,
        footer_height: f32,
        available_height: f32,
    ) {
        let old_metrics = self.metrics;
        let old_norms: SmallVec<[f32; 6]> = self
            .spec
            .snaps
            .iter()
            .map(|snap| normalize(snap, self.spec.positioning, &old_metrics))
            .collect();

        self.metrics.available_height = available_height;
        self.metrics.child_height = if child_height > 0.0 {
            child_height.max(self.min_content_height)
        } else {
            0.0
        };
        self.metrics.header_height = header_height;
        self.metrics.footer_height = footer_height;
        self.renormalize();

        tracing::debug!(
            available = available_height,
            child = child_height,
            header = header_height,
            footer = footer_height,
            "sheet remeasured, snaps {:?}",
            self.snappings
        );

        let height_changed =
            (old_metrics.available_height - available_height).abs() > f32::EPSILON;
        if height_changed && old_metrics.is_laid_out() {
            let repinned = self
                .spec
                .snaps
                .iter()
                .zip(old_norms.iter())
                .find(|(snap, old_norm)| {
                    snap.depends_on_measurements(self.spec.positioning)
                        && (self.current - **old_norm).abs() <= SNAP_REST_TOLERANCE
                })
                .map(|(snap, _)| normalize(snap, self.spec.positioning, &self.metrics));
            if let Some(new_extent) = repinned {
                self.set_extent(new_extent);
                return;
            }
        }

        self.notify();
    }

    /// Set the sheet decoration measurements that contribute to its height
    pub fn set_chrome(&mut self, vertical_padding: f32, border_thickness: f32) {
        self.metrics.vertical_padding = vertical_padding;
        self.metrics.border_thickness = border_thickness;
        self.renormalize();
    }

    /// Replace the snap spec wholesale, re-normalizing against current metrics
    pub fn replace_spec(&mut self, spec: SnapSpec) {
        self.spec = spec;
        self.renormalize();
        self.notify();
    }

    fn renormalize(&mut self) {
        let mut snappings: Snappings = self
            .spec
            .snaps
            .iter()
            .map(|snap| normalize(snap, self.spec.positioning, &self.metrics))
            .collect();
        if self.modal {
            // Index 0 is reserved for the fully-hidden state
            snappings.push(0.0);
        }
        snappings.sort_by(|a, b| a.partial_cmp(b).expect("snap extents are never NaN"));
        snappings.dedup_by(|a, b| (*a - *b).abs() < SNAP_DEDUP_TOLERANCE);
        self.snappings = snappings;
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Subscribe to snapshot changes; fires on every change once laid out
    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.listeners.insert(listener)
    }

    /// Remove a listener; unknown ids are ignored
    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }

    /// Deliver the current snapshot to every listener
    pub fn notify(&self) {
        if !self.is_laid_out() {
            return;
        }
        let state = SheetState::capture(self);
        for (_, listener) in self.listeners.iter() {
            listener(&state);
        }
    }
}
