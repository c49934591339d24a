//! Camera shake driven by impulse events
//!
//! Overlapping impulses do not stack: the stronger intensity and the longer
//! duration win independently.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
}

impl ScreenShake {
    pub fn add(&mut self, intensity: f32, duration: f32) {
        self.intensity = self.intensity.max(intensity.max(0.0));
        self.duration = self.duration.max(duration.max(0.0));
    }

    pub fn update(&mut self, dt: f32) {
        if self.duration > 0.0 {
            self.duration = (self.duration - dt).max(0.0);
        }
        if self.duration <= 0.0 {
            self.duration = 0.0;
            self.intensity = 0.0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.duration > 0.0
    }

    /// Integer pixel jitter for this frame, bounded by `intensity * duration * 0.9`
    pub fn offset<R: Rng + ?Sized>(&self, rng: &mut R) -> (i32, i32) {
        if self.duration <= 0.0 {
            return (0, 0);
        }
        let amp = (self.intensity * self.duration * 0.9) as i32;
        if amp <= 0 {
            return (0, 0);
        }
        (rng.random_range(-amp..=amp), rng.random_range(-amp..=amp))
    }
}
