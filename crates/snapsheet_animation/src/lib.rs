//! Snapsheet Animation System
//!
//! Duration-based tweens and a slotmap-keyed scheduler that ticks them.
//!
//! # Features
//!
//! - **Tweens**: timed from/to transitions with easing functions
//! - **Scheduler**: owns all active tweens, ticked once per frame
//! - **Interruptible**: removing a tween mid-flight leaves its last value

pub mod easing;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{AnimationScheduler, TweenId};
pub use tween::Tween;
