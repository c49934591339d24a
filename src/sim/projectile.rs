//! Straight-line bullets for both sides

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body};

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Fired by the player, travels up, damages enemies and asteroids
    Friendly,
    /// Fired by an enemy, travels down, damages the player
    Hostile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Signed vertical speed (negative = up)
    pub vel_y: f32,
    pub size: Vec2,
    pub side: Side,
    pub alive: bool,
    /// Playfield height and cull margin, captured at spawn
    screen_h: f32,
    cull_margin: f32,
}

impl Bullet {
    pub fn new(
        pos: Vec2,
        vel_y: f32,
        size: Vec2,
        side: Side,
        screen_h: f32,
        cull_margin: f32,
    ) -> Self {
        Self {
            pos,
            vel_y,
            size,
            side,
            alive: true,
            screen_h,
            cull_margin,
        }
    }

    pub fn is_friendly(&self) -> bool {
        self.side == Side::Friendly
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

impl Body for Bullet {
    fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.pos.y += self.vel_y * dt;

        let bounds = self.bounds();
        if bounds.bottom() < -self.cull_margin || bounds.top() > self.screen_h + self.cull_margin {
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
