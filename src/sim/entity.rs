//! Shared entity primitives: bounding boxes, countdown timers, and the small
//! capability trait every simulated body implements.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test; boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Non-negative countdown clock
///
/// Decrements by elapsed time each tick and clamps at zero. Active iff > 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown(f32);

impl Countdown {
    pub const ZERO: Countdown = Countdown(0.0);

    pub fn new(secs: f32) -> Self {
        Self(secs.max(0.0))
    }

    /// Remaining seconds
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.0
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.0 > 0.0
    }

    /// Advance by `dt`; returns true on the tick the clock reaches zero
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.0 <= 0.0 {
            return false;
        }
        self.0 = (self.0 - dt).max(0.0);
        self.0 == 0.0
    }

    pub fn set(&mut self, secs: f32) {
        self.0 = secs.max(0.0);
    }

    pub fn clear(&mut self) {
        self.0 = 0.0;
    }

    /// Remaining time as a fraction of `max` (0 when `max` is not positive)
    pub fn fraction_of(&self, max: f32) -> f32 {
        if max > 0.0 { (self.0 / max).clamp(0.0, 1.0) } else { 0.0 }
    }
}

/// Capability every simulated body exposes to the collision resolver and renderer
pub trait Body {
    /// Advance motion and clocks by `dt`
    fn update(&mut self, dt: f32);
    fn bounds(&self) -> Aabb;
    fn is_alive(&self) -> bool;
}
