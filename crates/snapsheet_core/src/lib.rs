//! Snapsheet Core
//!
//! Foundational types for the snapsheet engine:
//!
//! - **Snap Specs**: configured snap targets, including sentinel snaps
//!   resolved against live measurements
//! - **Metrics**: pixel measurements supplied by the layout collaborator
//! - **Normalization**: conversion between configured snap values and
//!   normalized extents in `[0, 1]`
//! - **Events + FSM**: event ids and the state-transition trait used by
//!   interaction state machines

pub mod error;
pub mod events;
pub mod metrics;
pub mod normalize;
pub mod snap;

pub use error::{ConfigError, Result};
pub use events::StateTransitions;
pub use metrics::SheetMetrics;
pub use normalize::{denormalize, normalize};
pub use snap::{Snap, SnapPositioning, SnapSpec};
