//! Drifting asteroids
//!
//! The simulation never spawns these on its own; they arrive through
//! `GameState::feed_asteroid` and are only moved, culled, and collided here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Atlas cell the renderer should draw
    pub sprite: u8,
    pub alive: bool,
    screen: Vec2,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, size: Vec2, sprite: u8, screen: Vec2) -> Self {
        Self {
            pos,
            vel,
            size,
            sprite,
            alive: true,
            screen,
        }
    }
}

impl Body for Asteroid {
    fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.pos += self.vel * dt;

        let b = self.bounds();
        let gone_below = b.top() > self.screen.y;
        let gone_sideways = b.right() < 0.0 || b.left() > self.screen.x;
        if gone_below || gone_sideways {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drifts_and_culls_below_screen() {
        let screen = Vec2::new(1200.0, 700.0);
        let mut a = Asteroid::new(
            Vec2::new(600.0, 650.0),
            Vec2::new(0.0, 100.0),
            Vec2::splat(40.0),
            0,
            screen,
        );
        a.update(0.5);
        assert!(a.alive);
        assert_eq!(a.pos.y, 700.0);
        a.update(0.3);
        assert!(!a.alive);
    }
}
