//! Duration-based tween animations

use crate::easing::Easing;

/// A timed transition between two values
///
/// Tweens are passive: the owner advances them with [`Tween::tick`] and reads
/// the interpolated [`Tween::value`]. A tween with zero duration is finished
/// immediately and reports its target value.
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    easing: Easing,
    elapsed_ms: f32,
    playing: bool,
}

impl Tween {
    /// Create a tween and start it
    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            elapsed_ms: 0.0,
            playing: duration_ms > 0,
        }
    }

    /// The value the tween is heading toward
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Progress through the duration (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// Whether the tween has run its full duration
    pub fn is_finished(&self) -> bool {
        !self.playing
    }

    /// Stop the tween where it is
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Advance by delta time in milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.duration_ms as f32 {
            self.elapsed_ms = self.duration_ms as f32;
            self.playing = false;
        }
    }
}
