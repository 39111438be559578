//! Animation scheduler
//!
//! Owns all active tweens and advances them each frame.

use slotmap::{new_key_type, SlotMap};

use crate::tween::Tween;

new_key_type! {
    pub struct TweenId;
}

/// The animation scheduler that ticks all active tweens
pub struct AnimationScheduler {
    tweens: SlotMap<TweenId, Tween>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
        }
    }

    pub fn add_tween(&mut self, tween: Tween) -> TweenId {
        self.tweens.insert(tween)
    }

    pub fn get_tween(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    pub fn get_tween_mut(&mut self, id: TweenId) -> Option<&mut Tween> {
        self.tweens.get_mut(id)
    }

    pub fn remove_tween(&mut self, id: TweenId) -> Option<Tween> {
        self.tweens.remove(id)
    }

    /// Advance all tweens by delta time in milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        for (_, tween) in self.tweens.iter_mut() {
            tween.tick(dt_ms);
        }
        tracing::trace!(active = self.tweens.len(), "scheduler tick {dt_ms:.1}ms");
    }

    /// Check if any tween is still running
    pub fn has_active_animations(&self) -> bool {
        self.tweens.iter().any(|(_, t)| !t.is_finished())
    }

    /// Number of tweens currently held (finished ones included until removed)
    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
