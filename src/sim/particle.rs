//! Cosmetic particles and explosion lifecycles
//!
//! Nothing here affects gameplay; the renderer reads positions and the
//! remaining life fraction.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::Tier;
use super::entity::{Aabb, Body};
use crate::consts::MAX_PARTICLES;
use crate::uniform_point;

/// What emitted a particle (renderer picks the colour from this)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Orange explosion debris
    Debris,
    /// Engine exhaust; hotter colour while the player is firing
    Exhaust { shooting: bool },
    /// White hull spark after taking damage
    Spark,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub life: f32,
    pub max_life: f32,
    pub kind: ParticleKind,
}

impl Particle {
    fn new<R: Rng + ?Sized>(
        rng: &mut R,
        pos: Vec2,
        kind: ParticleKind,
        life: f32,
        gravity: f32,
        vel_min: Vec2,
        vel_max: Vec2,
    ) -> Self {
        Self {
            pos,
            vel: uniform_point(rng, vel_min, vel_max),
            gravity,
            life,
            max_life: life,
            kind,
        }
    }

    /// Debris thrown out of an explosion
    pub fn debris<R: Rng + ?Sized>(rng: &mut R, pos: Vec2) -> Self {
        Self::new(
            rng,
            pos,
            ParticleKind::Debris,
            0.45,
            380.0,
            Vec2::new(-150.0, -240.0),
            Vec2::new(150.0, -20.0),
        )
    }

    /// Exhaust puff drifting down from the engine
    pub fn exhaust<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, shooting: bool) -> Self {
        Self::new(
            rng,
            pos,
            ParticleKind::Exhaust { shooting },
            0.2,
            0.0,
            Vec2::new(-30.0, 100.0),
            Vec2::new(30.0, 150.0),
        )
    }

    /// Spark at a random point on the hull
    pub fn spark<R: Rng + ?Sized>(rng: &mut R, hull: Aabb) -> Self {
        let pos = uniform_point(rng, hull.min, hull.max);
        Self::new(
            rng,
            pos,
            ParticleKind::Spark,
            0.15,
            100.0,
            Vec2::new(-200.0, -200.0),
            Vec2::new(200.0, -20.0),
        )
    }

    /// Remaining life in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Body for Particle {
    fn update(&mut self, dt: f32) {
        self.life = (self.life - dt).max(0.0);
        if self.life <= 0.0 {
            return;
        }
        self.vel.y += self.gravity * dt;
        self.pos += self.vel * dt;
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(3.0))
    }

    fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Add a particle unless the pool is full
pub fn push_capped(particles: &mut Vec<Particle>, particle: Particle) {
    if particles.len() < MAX_PARTICLES {
        particles.push(particle);
    }
}

/// Emit a debris burst at `pos`
pub fn burst<R: Rng + ?Sized>(particles: &mut Vec<Particle>, rng: &mut R, pos: Vec2, count: u32) {
    for _ in 0..count {
        push_capped(particles, Particle::debris(rng, pos));
    }
}

/// An enemy explosion animation in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub tier: Tier,
    pub elapsed: f32,
    pub duration: f32,
}

impl Explosion {
    pub fn new(pos: Vec2, tier: Tier, duration: f32) -> Self {
        Self {
            pos,
            tier,
            elapsed: 0.0,
            duration,
        }
    }

    /// Remaining life in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        if self.duration > 0.0 {
            (1.0 - self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Animation frame index at `fps`
    pub fn frame(&self, fps: f32) -> u32 {
        (self.elapsed * fps) as u32
    }
}

impl Body for Explosion {
    fn update(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(140.0))
    }

    fn is_alive(&self) -> bool {
        self.elapsed < self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_debris_falls_under_gravity_and_dies() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut p = Particle::debris(&mut rng, Vec2::new(100.0, 100.0));
        assert!(p.vel.y < 0.0, "debris is thrown upward");
        let vy0 = p.vel.y;
        p.update(0.1);
        assert!(p.vel.y > vy0);
        assert!((p.life_fraction() - 0.35 / 0.45).abs() < 1e-4);
        p.update(0.4);
        assert!(!p.is_alive());
        assert_eq!(p.life_fraction(), 0.0);
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, Vec2::ZERO, 16);
        assert_eq!(particles.len(), 16);
        burst(&mut particles, &mut rng, Vec2::ZERO, MAX_PARTICLES as u32);
        assert_eq!(particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_spark_starts_on_hull() {
        let mut rng = Pcg32::seed_from_u64(4);
        let hull = Aabb::from_center(Vec2::new(600.0, 630.0), Vec2::splat(84.0));
        for _ in 0..50 {
            let p = Particle::spark(&mut rng, hull);
            assert!(p.pos.x >= hull.left() && p.pos.x <= hull.right());
            assert!(p.pos.y >= hull.top() && p.pos.y <= hull.bottom());
        }
    }

    #[test]
    fn test_explosion_lifecycle() {
        let mut e = Explosion::new(Vec2::ZERO, Tier::One, 0.25);
        assert_eq!(e.life_fraction(), 1.0);
        e.update(0.125);
        assert!((e.life_fraction() - 0.5).abs() < 1e-6);
        assert_eq!(e.frame(40.0), 5);
        e.update(0.2);
        assert!(!e.is_alive());
    }
}
