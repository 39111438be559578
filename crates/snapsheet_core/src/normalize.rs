//! Conversion between configured snap values and normalized extents
//!
//! `normalize` maps a configured snap into a fraction of the available
//! height; `denormalize` reverse-maps a resolved extent back into the
//! configured coordinate space for external consumers. Sentinels never
//! appear on the reverse path because the current extent is already a
//! plain number by the time it is reported outward.

use crate::metrics::SheetMetrics;
use crate::snap::{Snap, SnapPositioning};

/// Normalize a configured snap into an extent in `[0, 1]`
///
/// Before the first layout pass literal values pass through clamped, so a
/// sheet configured with fractions behaves sanely while measurements are
/// still pending. A snap can never request more height than the sheet's
/// content provides: the result is capped at the max possible extent.
pub fn normalize(snap: &Snap, positioning: SnapPositioning, metrics: &SheetMetrics) -> f32 {
    let max_possible = metrics.max_possible_extent();

    let extent = match snap {
        Snap::Value(value) => {
            if !metrics.is_laid_out() {
                return value.clamp(0.0, 1.0);
            }
            match positioning {
                SnapPositioning::RelativeToAvailableSpace => *value,
                SnapPositioning::RelativeToSheetContentHeight => {
                    value * (metrics.max_height() / metrics.available_height)
                }
                SnapPositioning::PixelOffset => value / metrics.available_height,
            }
        }
        Snap::Header => metrics.header_extent(),
        Snap::Footer => metrics.footer_extent(),
        Snap::HeaderAndFooter => metrics.header_extent() + metrics.footer_extent(),
        Snap::Expanded => max_possible,
    };

    extent.min(max_possible).clamp(0.0, 1.0)
}

/// Reverse-map a normalized extent into the configured coordinate space
pub fn denormalize(extent: f32, positioning: SnapPositioning, metrics: &SheetMetrics) -> f32 {
    if !metrics.is_laid_out() {
        return extent;
    }
    match positioning {
        SnapPositioning::RelativeToAvailableSpace => extent,
        SnapPositioning::RelativeToSheetContentHeight => {
            let max_height = metrics.max_height();
            if max_height > 0.0 {
                extent * (metrics.available_height / max_height)
            } else {
                0.0
            }
        }
        SnapPositioning::PixelOffset => extent * metrics.available_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(available: f32, child: f32, header: f32, footer: f32) -> SheetMetrics {
        SheetMetrics::new(available, child, header, footer)
    }

    #[test]
    fn test_relative_to_available_space_is_identity() {
        let m = metrics(800.0, 900.0, 0.0, 0.0);
        for value in [0.0, 0.25, 0.5, 1.0] {
            let snap = Snap::Value(value);
            assert_eq!(
                normalize(&snap, SnapPositioning::RelativeToAvailableSpace, &m),
                value
            );
        }
    }

    #[test]
    fn test_pixel_offset_divides_by_available_height() {
        let m = metrics(800.0, 900.0, 0.0, 0.0);
        let snap = Snap::Value(200.0);
        assert!((normalize(&snap, SnapPositioning::PixelOffset, &m) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_content_relative_scales_by_max_height() {
        // Content shorter than the space: max_height = 400, so a full
        // content-relative snap covers half the available height.
        let m = metrics(800.0, 400.0, 0.0, 0.0);
        let snap = Snap::Value(1.0);
        let extent = normalize(&snap, SnapPositioning::RelativeToSheetContentHeight, &m);
        assert!((extent - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_result_capped_at_max_possible_extent() {
        // Content only fills 60% of the space; a 0.9 snap is capped there.
        let m = metrics(1000.0, 600.0, 0.0, 0.0);
        let snap = Snap::Value(0.9);
        let extent = normalize(&snap, SnapPositioning::RelativeToAvailableSpace, &m);
        assert!((extent - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_sentinels_resolve_against_measurements() {
        let m = metrics(800.0, 900.0, 64.0, 48.0);
        assert!(
            (normalize(&Snap::Header, SnapPositioning::RelativeToAvailableSpace, &m)
                - 64.0 / 800.0)
                .abs()
                < 1e-6
        );
        assert!(
            (normalize(&Snap::Footer, SnapPositioning::RelativeToAvailableSpace, &m)
                - 48.0 / 800.0)
                .abs()
                < 1e-6
        );
        assert!(
            (normalize(
                &Snap::HeaderAndFooter,
                SnapPositioning::RelativeToAvailableSpace,
                &m
            ) - 112.0 / 800.0)
                .abs()
                < 1e-6
        );
        assert_eq!(
            normalize(&Snap::Expanded, SnapPositioning::RelativeToAvailableSpace, &m),
            1.0
        );
    }

    #[test]
    fn test_expanded_caps_at_content_height() {
        let m = metrics(1000.0, 600.0, 0.0, 0.0);
        let extent = normalize(&Snap::Expanded, SnapPositioning::RelativeToAvailableSpace, &m);
        assert!((extent - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_pre_layout_passthrough() {
        let m = SheetMetrics::default();
        assert_eq!(
            normalize(&Snap::Value(0.7), SnapPositioning::PixelOffset, &m),
            0.7
        );
        assert_eq!(
            normalize(&Snap::Value(300.0), SnapPositioning::PixelOffset, &m),
            1.0
        );
        assert_eq!(
            normalize(&Snap::Header, SnapPositioning::RelativeToAvailableSpace, &m),
            0.0
        );
    }

    #[test]
    fn test_round_trip_per_positioning_mode() {
        let m = metrics(800.0, 900.0, 0.0, 0.0);
        let cases = [
            (SnapPositioning::RelativeToAvailableSpace, 0.35),
            (SnapPositioning::RelativeToSheetContentHeight, 0.35),
            (SnapPositioning::PixelOffset, 280.0),
        ];
        for (positioning, raw) in cases {
            let extent = normalize(&Snap::Value(raw), positioning, &m);
            let back = denormalize(extent, positioning, &m);
            assert!(
                (back - raw).abs() < 1e-3,
                "round trip failed for {positioning:?}: {raw} -> {extent} -> {back}"
            );
        }
    }

    #[test]
    fn test_denormalize_pre_layout_is_identity() {
        let m = SheetMetrics::default();
        assert_eq!(denormalize(0.4, SnapPositioning::PixelOffset, &m), 0.4);
    }
}
