//! Sheet configuration

use snapsheet_core::{Result, SnapSpec};

/// Configuration for a sheet instance
///
/// Validated eagerly when the engine is constructed; invalid configurations
/// surface as [`ConfigError`](snapsheet_core::ConfigError) instead of being
/// silently clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Snap targets and their coordinate mode
    pub snap_spec: SnapSpec,
    /// One-shot modal overlay, dismissible to extent 0
    pub modal: bool,
    /// Base settle animation duration in milliseconds
    pub base_duration_ms: u32,
    /// Floor for the measured content height in pixels
    pub min_content_height: f32,
    /// Dismiss a modal sheet when the backdrop is tapped
    pub close_on_backdrop_tap: bool,
    /// Allow gesture/backdrop dismissal of a modal sheet
    pub dismissable: bool,
    /// Whether a header builder is configured
    pub has_header: bool,
    /// Whether a footer builder is configured
    pub has_footer: bool,
    /// Vertical padding contributing to the sheet height
    pub vertical_padding: f32,
    /// Border thickness contributing to the sheet height
    pub border_thickness: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            snap_spec: SnapSpec::default(),
            modal: false,
            base_duration_ms: 400,
            min_content_height: 0.0,
            close_on_backdrop_tap: false,
            dismissable: true,
            has_header: false,
            has_footer: false,
            vertical_padding: 0.0,
            border_thickness: 0.0,
        }
    }
}

impl SheetConfig {
    /// Config for a modal overlay sheet
    pub fn modal(snap_spec: SnapSpec) -> Self {
        Self {
            snap_spec,
            modal: true,
            close_on_backdrop_tap: true,
            ..Default::default()
        }
    }

    /// Config for a persistent sheet with the given snap spec
    pub fn persistent(snap_spec: SnapSpec) -> Self {
        Self {
            snap_spec,
            ..Default::default()
        }
    }

    /// Validate the configuration eagerly
    pub fn validate(&self) -> Result<()> {
        self.snap_spec
            .validate(self.modal, self.has_header, self.has_footer)
    }
}
