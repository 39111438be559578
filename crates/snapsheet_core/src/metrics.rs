//! Sheet measurements supplied by the layout collaborator
//!
//! All heights are pixels and stay `0.0` until the first layout pass
//! completes. Every derived quantity guards against division by zero so a
//! half-measured sheet can never produce NaN extents.

/// Pixel measurements of the sheet and the space it lives in
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SheetMetrics {
    /// Height of the space the sheet may cover
    pub available_height: f32,
    /// Measured height of the sheet's body content
    pub child_height: f32,
    /// Measured height of the header, 0 when absent
    pub header_height: f32,
    /// Measured height of the footer, 0 when absent
    pub footer_height: f32,
    /// Vertical padding around the body
    pub vertical_padding: f32,
    /// Border thickness of the sheet decoration
    pub border_thickness: f32,
}

impl SheetMetrics {
    /// Create metrics from the measurements a layout pass delivers
    pub fn new(
        available_height: f32,
        child_height: f32,
        header_height: f32,
        footer_height: f32,
    ) -> Self {
        Self {
            available_height,
            child_height,
            header_height,
            footer_height,
            ..Default::default()
        }
    }

    /// Whether a layout pass has produced usable measurements
    pub fn is_laid_out(&self) -> bool {
        self.available_height > 0.0 && self.child_height > 0.0
    }

    /// Total pixel height the sheet's content asks for
    pub fn sheet_height(&self) -> f32 {
        self.child_height
            + self.header_height
            + self.footer_height
            + self.vertical_padding
            + self.border_thickness
    }

    /// Sheet height capped at the available space
    pub fn max_height(&self) -> f32 {
        self.sheet_height().min(self.available_height)
    }

    /// Largest extent the sheet content can fill, in `[0, 1]`
    ///
    /// `1.0` before layout so pre-layout snaps are not clipped.
    pub fn max_possible_extent(&self) -> f32 {
        if self.is_laid_out() {
            (self.sheet_height() / self.available_height).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Extent covered by the header (half the border counts toward it)
    pub fn header_extent(&self) -> f32 {
        if self.is_laid_out() {
            (self.header_height + self.border_thickness / 2.0) / self.available_height
        } else {
            0.0
        }
    }

    /// Extent covered by the footer (half the border counts toward it)
    pub fn footer_extent(&self) -> f32 {
        if self.is_laid_out() {
            (self.footer_height + self.border_thickness / 2.0) / self.available_height
        } else {
            0.0
        }
    }
}
