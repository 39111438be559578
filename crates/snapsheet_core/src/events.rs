//! Event ids and the state-transition trait
//!
//! Interaction state machines consume plain `u32` event ids and answer with
//! the next state, or `None` when the event does not transition.

use std::hash::Hash;

/// Event type identifier
pub type EventType = u32;

/// Event ids consumed by the sheet interaction state machines
pub mod event_types {
    use super::EventType;

    /// Pointer went down on the sheet (grab)
    pub const POINTER_DOWN: EventType = 1;
    /// Pointer released after a drag
    pub const POINTER_UP: EventType = 2;
    /// Incremental drag movement
    pub const DRAG: EventType = 3;
    /// A programmatic or fling-triggered settle animation started
    pub const ANIMATE: EventType = 10;
    /// The active settle animation completed (or was resolved instantly)
    pub const SETTLED: EventType = 11;
    /// A layout pass delivered fresh measurements
    pub const LAYOUT: EventType = 20;
}

/// Trait for state types that transition on events
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Phase {
///     #[default]
///     Idle,
///     Active,
/// }
///
/// impl StateTransitions for Phase {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         use snapsheet_core::events::event_types::*;
///         match (self, event) {
///             (Phase::Idle, POINTER_DOWN) => Some(Phase::Active),
///             (Phase::Active, POINTER_UP) => Some(Phase::Idle),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}
