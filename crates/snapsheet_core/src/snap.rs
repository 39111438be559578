//! Snap targets and the spec that configures them
//!
//! A snap is either a literal number interpreted through the configured
//! positioning mode, or a sentinel resolved against live measurements.
//! Sentinels are matched by variant identity, never by numeric equality.

use smallvec::{smallvec, SmallVec};

use crate::error::{ConfigError, Result};

/// Inline capacity for snap lists; most sheets configure 2-4 snaps
pub type SnapList = SmallVec<[Snap; 4]>;

// ============================================================================
// Positioning
// ============================================================================

/// How literal snap values are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapPositioning {
    /// Value is already a fraction of the available height (`[0, 1]`)
    #[default]
    RelativeToAvailableSpace,
    /// Value is a fraction of the sheet's own (capped) content height
    RelativeToSheetContentHeight,
    /// Value is a pixel offset from the bottom
    PixelOffset,
}

// ============================================================================
// Snap
// ============================================================================

/// A configured snap target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Snap {
    /// Literal value, interpreted through the positioning mode
    Value(f32),
    /// Rest with exactly the header visible
    Header,
    /// Rest with exactly the footer visible
    Footer,
    /// Rest with header and footer visible
    HeaderAndFooter,
    /// As large as the content allows, capped at the available height
    Expanded,
}

impl Snap {
    /// Whether the normalized extent of this snap moves when the available
    /// height or content size changes
    pub fn depends_on_measurements(&self, positioning: SnapPositioning) -> bool {
        match self {
            Snap::Value(_) => !matches!(positioning, SnapPositioning::RelativeToAvailableSpace),
            _ => true,
        }
    }
}

impl From<f32> for Snap {
    fn from(value: f32) -> Self {
        Snap::Value(value)
    }
}

// ============================================================================
// SnapSpec
// ============================================================================

/// Immutable configuration of the valid snap targets
#[derive(Debug, Clone, PartialEq)]
pub struct SnapSpec {
    /// How literal snap values are interpreted
    pub positioning: SnapPositioning,
    /// Ordered snap targets; duplicates collapse after normalization
    pub snaps: SnapList,
}

impl Default for SnapSpec {
    fn default() -> Self {
        Self {
            positioning: SnapPositioning::RelativeToAvailableSpace,
            snaps: smallvec![Snap::Value(0.4), Snap::Expanded],
        }
    }
}

impl SnapSpec {
    /// Create a spec from explicit snaps
    pub fn new(positioning: SnapPositioning, snaps: impl IntoIterator<Item = Snap>) -> Self {
        Self {
            positioning,
            snaps: snaps.into_iter().collect(),
        }
    }

    /// Spec for a one-shot modal overlay pinned at a single extent
    pub fn pinned(positioning: SnapPositioning, snap: Snap) -> Self {
        Self {
            positioning,
            snaps: smallvec![snap],
        }
    }

    /// Spec resting at the header or fully expanded
    pub fn header_or_expanded() -> Self {
        Self {
            positioning: SnapPositioning::RelativeToAvailableSpace,
            snaps: smallvec![Snap::Header, Snap::Expanded],
        }
    }

    /// Validate the configuration eagerly
    ///
    /// `modal` relaxes the two-snap requirement: a modal overlay may pin a
    /// single extent because the hidden state `0.0` is implied.
    pub fn validate(&self, modal: bool, has_header: bool, has_footer: bool) -> Result<()> {
        for snap in &self.snaps {
            match snap {
                Snap::Value(value) if !value.is_finite() => {
                    return Err(ConfigError::NonFiniteSnap { value: *value })
                }
                Snap::Header if !has_header => return Err(ConfigError::MissingHeader),
                Snap::Footer if !has_footer => return Err(ConfigError::MissingFooter),
                Snap::HeaderAndFooter if !has_header && !has_footer => {
                    return Err(ConfigError::MissingHeader)
                }
                _ => {}
            }
        }

        if !modal {
            let distinct = self.distinct_count();
            if distinct < 2 {
                return Err(ConfigError::TooFewSnaps {
                    required: 2,
                    got: distinct,
                });
            }
            // Fraction snaps clamp to [0, 1] at normalization, so literals
            // that are distinct as configured can still collapse to a single
            // resting extent.
            if self.positioning == SnapPositioning::RelativeToAvailableSpace {
                let clamped: Option<SmallVec<[f32; 4]>> = self
                    .snaps
                    .iter()
                    .map(|snap| match snap {
                        Snap::Value(v) => Some(v.clamp(0.0, 1.0)),
                        _ => None,
                    })
                    .collect();
                if let Some(clamped) = clamped {
                    let min = clamped.iter().copied().fold(f32::INFINITY, f32::min);
                    let max = clamped.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                    if (max - min).abs() < 1e-4 {
                        return Err(ConfigError::DegenerateRange { extent: max });
                    }
                }
            }
        } else if self.snaps.is_empty() {
            return Err(ConfigError::TooFewSnaps {
                required: 1,
                got: 0,
            });
        }

        Ok(())
    }

    /// Count snaps that are distinct before normalization
    ///
    /// Sentinels are distinct from every literal; literals compare with a
    /// small tolerance so `0.5` and `0.5000001` count once.
    fn distinct_count(&self) -> usize {
        let mut distinct: SnapList = SmallVec::new();
        for snap in &self.snaps {
            let dup = distinct.iter().any(|seen| match (seen, snap) {
                (Snap::Value(a), Snap::Value(b)) => (a - b).abs() < 1e-4,
                (a, b) => a == b,
            });
            if !dup {
                distinct.push(*snap);
            }
        }
        distinct.len()
    }
}
