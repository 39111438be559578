//! Read-only sheet state snapshots
//!
//! A snapshot is recomputed on demand from the extent state and handed to
//! listeners and content builders. It is never mutated after construction and
//! is cheap enough to capture on every notification.

use crate::extent::SheetExtent;

/// Derived, immutable view of the sheet for listeners and builders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetState {
    /// Current normalized extent in `[0, 1]`
    pub extent: f32,
    /// Smallest configured extent while shown
    pub min_extent: f32,
    /// Largest configured extent
    pub max_extent: f32,
    /// Position between min and max extent, in `[0, 1]`
    pub progress: f32,
    /// Current content scroll offset in pixels
    pub scroll_offset: f32,
    /// Whether measurements from a layout pass exist
    pub is_laid_out: bool,
    /// Whether the sheet rests at its maximum extent
    pub is_expanded: bool,
    /// Whether the sheet rests at its minimum extent
    pub is_collapsed: bool,
    /// Whether the scrollable content sits at its top
    pub is_at_top: bool,
    /// Whether the scrollable content sits at its bottom
    pub is_at_bottom: bool,
    /// Whether the sheet covers no height at all
    pub is_hidden: bool,
    /// Inverse of `is_hidden`
    pub is_shown: bool,
}

impl SheetState {
    /// Capture a snapshot of the current extent state
    ///
    /// Pure function of the extent; safe to call on every frame.
    pub fn capture(extent: &SheetExtent) -> Self {
        let current = extent.current_extent();
        let min_extent = extent.min_extent();
        let max_extent = extent.max_extent();

        // A single-snap modal pins min == max; treating min as 0 keeps
        // progress well-defined instead of dividing by zero.
        let progress_min = if (max_extent - min_extent).abs() <= f32::EPSILON {
            0.0
        } else {
            min_extent
        };
        let range = max_extent - progress_min;
        let progress = if range > 0.0 {
            ((current - progress_min) / range).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let hidden = round3(current) <= 0.0;

        Self {
            extent: current,
            min_extent,
            max_extent,
            progress,
            scroll_offset: extent.scroll_offset(),
            is_laid_out: extent.is_laid_out(),
            is_expanded: round3(current) >= round3(max_extent),
            is_collapsed: round3(current) <= round3(min_extent),
            is_at_top: extent.is_at_top(),
            is_at_bottom: extent.is_at_bottom(),
            is_hidden: hidden,
            is_shown: !hidden,
        }
    }
}

/// Round to 3 decimal places; extent comparisons tolerate float error
#[inline]
fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
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
        extent.update_measurements(900.0, 0.0, 0.0, 800.0);
        extent
    }

    #[test]
    fn test_progress_endpoints() {
        let mut extent = extent_with(&[0.2, 0.9], false);

        extent.set_extent(0.2);
        let state = SheetState::capture(&extent);
        assert_eq!(state.progress, 0.0);
        assert!(state.is_collapsed);
        assert!(!state.is_expanded);

        extent.set_extent(0.9);
        let state = SheetState::capture(&extent);
        assert_eq!(state.progress, 1.0);
        assert!(state.is_expanded);
        assert!(!state.is_collapsed);
    }

    #[test]
    fn test_progress_always_in_unit_range() {
        let mut extent = extent_with(&[0.2, 0.9], false);
        for value in [0.0, 0.1, 0.2, 0.55, 0.9, 1.0] {
            extent.set_extent(value);
            let state = SheetState::capture(&extent);
            assert!((0.0..=1.0).contains(&state.progress), "at extent {value}");
        }
    }

    #[test]
    fn test_single_snap_modal_has_defined_progress() {
        let mut extent = extent_with(&[0.6], true);
        extent.set_extent(0.3);
        let state = SheetState::capture(&extent);
        assert!((state.progress - 0.5).abs() < 1e-6);
        assert_eq!(state.min_extent, state.max_extent);
    }

    #[test]
    fn test_expanded_tolerates_float_error() {
        let mut extent = extent_with(&[0.2, 0.9], false);
        extent.set_extent(0.8999);
        let state = SheetState::capture(&extent);
        assert!(state.is_expanded);
    }

    #[test]
    fn test_hidden_and_shown() {
        let mut extent = extent_with(&[0.6], true);
        extent.set_extent(0.0);
        let state = SheetState::capture(&extent);
        assert!(state.is_hidden);
        assert!(!state.is_shown);
        assert!(state.is_collapsed);

        extent.set_extent(0.6);
        let state = SheetState::capture(&extent);
        assert!(state.is_shown);
        assert!(state.is_expanded && state.is_collapsed);
    }
}
