//! Snapsheet engine
//!
//! Coordination core for a draggable, scrollable overlay sheet: one
//! continuous drag gesture drives both the sheet's extent (how much of the
//! available height it covers) and its content scroll offset, settling onto
//! configured snap positions on release.
//!
//! # Features
//!
//! - **Extent state**: single source of truth with normalized snap lists,
//!   re-normalized on every layout pass
//! - **Gesture coordination**: per-delta routing between sheet resizing and
//!   content scrolling, with fling-directional snap resolution
//! - **Two-phase settling**: scroll returns to top before the extent moves
//! - **Imperative control**: clonable [`SheetController`] handle for
//!   expand/collapse/show/hide/snap operations
//! - **Snapshots**: immutable [`SheetState`] views delivered to listeners on
//!   every change
//!
//! # Example
//!
//! ```
//! use snapsheet_engine::{SheetConfig, SheetController};
//! use snapsheet_core::{Snap, SnapPositioning, SnapSpec};
//!
//! let spec = SnapSpec::new(
//!     SnapPositioning::RelativeToAvailableSpace,
//!     [Snap::Value(0.4), Snap::Expanded],
//! );
//! let controller = SheetController::new(SheetConfig::persistent(spec))?;
//!
//! // Layout pass reports measurements before anything can move
//! controller
//!     .engine()
//!     .lock()
//!     .unwrap()
//!     .update_measurements(1200.0, 0.0, 0.0, 1000.0);
//!
//! controller.expand();
//! while controller.tick(16.0) {}
//! assert!(controller.state().is_expanded);
//! # Ok::<(), snapsheet_core::ConfigError>(())
//! ```

pub mod config;
pub mod controller;
pub mod coordinator;
pub mod engine;
pub mod extent;
pub mod snapshot;

pub use config::SheetConfig;
pub use controller::{SheetController, SharedSheetEngine};
pub use coordinator::{
    route_delta, DeltaTarget, DragPhase, DragScrollCoordinator, DISMISS_DISTANCE_FACTOR,
    DISMISS_EXTENT_VELOCITY, FLING_EXTENT_VELOCITY,
};
pub use engine::SheetEngine;
pub use extent::{Listener, ListenerId, SheetExtent, SNAP_REST_TOLERANCE};
pub use snapshot::SheetState;
