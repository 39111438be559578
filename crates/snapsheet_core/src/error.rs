//! Configuration error types

use thiserror::Error;

/// Errors detected eagerly when a sheet configuration is validated
///
/// These surface to the embedding caller at construction time. Runtime
/// layout-timing issues are never errors; they are absorbed as no-ops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A persistent (non-modal) sheet needs at least two distinct snaps
    #[error("persistent sheet requires at least {required} distinct snaps, got {got}")]
    TooFewSnaps { required: usize, got: usize },

    /// A literal snap value is NaN or infinite
    #[error("snap value {value} is not a finite number")]
    NonFiniteSnap { value: f32 },

    /// A header sentinel snap was configured but no header exists
    #[error("snap references the header, but the sheet has no header")]
    MissingHeader,

    /// A footer sentinel snap was configured but no footer exists
    #[error("snap references the footer, but the sheet has no footer")]
    MissingFooter,

    /// All snaps of a persistent sheet collapse to the same extent
    #[error("persistent sheet snaps collapse to a single extent ({extent})")]
    DegenerateRange { extent: f32 },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
