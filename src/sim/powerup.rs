//! Falling power-ups dropped by destroyed enemies

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body, Countdown};
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// One extra life, up to the cap
    Heal,
    /// Faster triple-shot for a while
    Rapid,
    /// Ignore hits for a while
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Heal, PowerUpKind::Rapid, PowerUpKind::Shield];

    /// Uniformly random kind
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&PowerUpKind::Heal)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub ttl: Countdown,
    pub kind: PowerUpKind,
    pub alive: bool,
    screen_h: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: tuning.powerup_size,
            vel_y: tuning.powerup_fall_speed,
            ttl: Countdown::new(tuning.powerup_ttl),
            kind,
            alive: true,
            screen_h: tuning.screen_h,
        }
    }

    /// Roll the drop chance for a kill at `pos`
    pub fn roll_drop<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, tuning: &Tuning) -> Option<Self> {
        if rng.random_bool(tuning.powerup_chance) {
            Some(Self::new(pos, PowerUpKind::random(rng), tuning))
        } else {
            None
        }
    }
}

impl Body for PowerUp {
    fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.pos.y += self.vel_y * dt;
        self.ttl.tick(dt);
        if !self.ttl.is_active() || self.bounds().top() > self.screen_h {
            self.alive = false;
        }
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
