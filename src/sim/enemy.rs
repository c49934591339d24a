//! Enemy ships: horizontal bounce, independent fire clocks, tiered stats

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body, Countdown};
use super::projectile::{Bullet, Side};
use super::shake::ScreenShake;
use crate::tuning::Tuning;
use crate::uniform;

/// Enemy difficulty class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    One,
    Two,
    Three,
    Four,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::One, Tier::Two, Tier::Three, Tier::Four];

    /// Tier from its 1-based number.
    ///
    /// # Panics
    /// Tiers are a closed set owned by the simulation; anything outside 1..=4
    /// is a bug.
    pub fn from_number(n: u8) -> Self {
        match n {
            1 => Tier::One,
            2 => Tier::Two,
            3 => Tier::Three,
            4 => Tier::Four,
            _ => panic!("enemy tier out of range: {n}"),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
            Tier::Four => 4,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_number(rng.random_range(1..=4))
    }

    /// Points awarded for destroying an enemy of this tier
    pub fn score_value(self) -> u64 {
        match self {
            Tier::One => 60,
            Tier::Two => 80,
            Tier::Three => 95,
            Tier::Four => 110,
        }
    }

    /// Steps above tier one
    fn steps(self) -> f32 {
        (self.number() - 1) as f32
    }
}

/// Base horizontal speed for a tier on a given wave
pub fn enemy_speed(tier: Tier, wave: u32, tuning: &Tuning) -> f32 {
    tuning.enemy_base_speed
        + tuning.enemy_speed_per_wave * wave as f32
        + tuning.enemy_speed_per_tier * tier.steps()
}

/// Shoot cooldown range `(min, max)` for a tier on a given wave, floored
pub fn cooldown_range(tier: Tier, wave: u32, tuning: &Tuning) -> (f32, f32) {
    let (base_min, base_max) = tuning.enemy_cooldown_base;
    let (shrink_min, shrink_max) = tuning.enemy_cooldown_shrink_per_wave;
    let (floor_min, floor_max) = tuning.enemy_cooldown_floor;
    let tier_shrink = tuning.enemy_cooldown_shrink_per_tier * tier.steps();

    let min = (base_min - shrink_min * wave as f32 - tier_shrink).max(floor_min);
    let max = (base_max - shrink_max * wave as f32 - tier_shrink).max(floor_max).max(min);
    (min, max)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Center position; y never changes after spawn
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_x: f32,
    pub shoot_clock: Countdown,
    pub cooldown: (f32, f32),
    pub tier: Tier,
    pub score_value: u64,
    pub alive: bool,
    screen_w: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, vel_x: f32, tier: Tier, cooldown: (f32, f32), tuning: &Tuning) -> Self {
        debug_assert!(cooldown.0 <= cooldown.1);
        Self {
            pos,
            size: tuning.enemy_size,
            vel_x,
            shoot_clock: Countdown::new(cooldown.0),
            cooldown,
            tier,
            score_value: tier.score_value(),
            alive: true,
            screen_w: tuning.screen_w,
        }
    }

    /// Spawn a random-tier enemy somewhere in the spawn band
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, wave: u32, tuning: &Tuning) -> Self {
        let tier = Tier::random(rng);
        let size = tuning.enemy_size;

        let left = uniform(rng, 0.0, (tuning.screen_w - size.x).max(0.0));
        let top = uniform(rng, tuning.enemy_spawn_band.0, tuning.enemy_spawn_band.1);
        let pos = Vec2::new(left, top) + size * 0.5;

        let jitter = uniform(rng, -tuning.enemy_speed_jitter, tuning.enemy_speed_jitter);
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let vel_x = dir * (enemy_speed(tier, wave, tuning) + jitter);

        let cooldown = cooldown_range(tier, wave, tuning);
        let mut enemy = Self::new(pos, vel_x, tier, cooldown, tuning);
        enemy.shoot_clock.set(uniform(rng, cooldown.0, cooldown.1));
        enemy
    }

    /// Run down the fire clock; fires one downward bullet when it expires
    pub fn try_shoot<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<Bullet> {
        if !self.alive {
            return None;
        }
        self.shoot_clock.tick(dt);
        if self.shoot_clock.is_active() {
            return None;
        }

        self.shoot_clock.set(uniform(rng, self.cooldown.0, self.cooldown.1));
        let muzzle = Vec2::new(self.pos.x, self.bounds().bottom() - 6.0);
        Some(Bullet::new(
            muzzle,
            tuning.enemy_bullet_speed,
            tuning.enemy_bullet_size,
            Side::Hostile,
            tuning.screen_h,
            tuning.bullet_cull_margin,
        ))
    }

    /// Terminal: mark dead and kick the camera. Returns false if already dead.
    pub fn explode(&mut self, tuning: &Tuning, shake: &mut ScreenShake) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        shake.add(tuning.explosion_shake.0, tuning.explosion_shake.1);
        true
    }
}

impl Body for Enemy {
    fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.pos.x += self.vel_x * dt;

        let bounds = self.bounds();
        if bounds.left() <= 0.0 {
            self.vel_x = self.vel_x.abs();
        } else if bounds.right() >= self.screen_w {
            self.vel_x = -self.vel_x.abs();
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
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tier_table() {
        let scores: Vec<u64> = Tier::ALL.iter().map(|t| t.score_value()).collect();
        assert_eq!(scores, vec![60, 80, 95, 110]);
        for tier in Tier::ALL {
            assert_eq!(Tier::from_number(tier.number()), tier);
        }
    }

    #[test]
    #[should_panic(expected = "enemy tier out of range")]
    fn test_tier_out_of_range_panics() {
        Tier::from_number(5);
    }

    #[test]
    fn test_speed_scales_with_wave_and_tier() {
        let tuning = Tuning::default();
        assert_eq!(enemy_speed(Tier::One, 1, &tuning), 150.0);
        assert_eq!(enemy_speed(Tier::Four, 1, &tuning), 180.0);
        assert_eq!(enemy_speed(Tier::Two, 5, &tuning), 200.0);
    }

    #[test]
    fn test_cooldown_range_shrinks() {
        let tuning = Tuning::default();
        let (min1, max1) = cooldown_range(Tier::One, 1, &tuning);
        assert!((min1 - 0.85).abs() < 1e-5);
        assert!((max1 - 2.1).abs() < 1e-5);
        let (min4, max4) = cooldown_range(Tier::Four, 1, &tuning);
        assert!((min4 - 0.7).abs() < 1e-5);
        assert!((max4 - 1.95).abs() < 1e-5);
    }

    #[test]
    fn test_bounces_off_edges() {
        let tuning = Tuning::default();
        let mut enemy = Enemy::new(Vec2::new(45.0, 100.0), -300.0, Tier::One, (1.0, 2.0), &tuning);
        enemy.update(0.1);
        assert!(enemy.vel_x > 0.0, "left edge flips to positive");
        assert_eq!(enemy.pos.y, 100.0);

        let mut enemy = Enemy::new(Vec2::new(1155.0, 100.0), 300.0, Tier::One, (1.0, 2.0), &tuning);
        enemy.update(0.1);
        assert!(enemy.vel_x < 0.0, "right edge flips to negative");
    }

    #[test]
    fn test_dead_enemy_is_inert() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut shake = ScreenShake::default();
        let mut enemy = Enemy::new(Vec2::new(500.0, 100.0), 100.0, Tier::Two, (0.5, 1.0), &tuning);

        assert!(enemy.explode(&tuning, &mut shake));
        assert_eq!(shake.intensity, 11.0);
        assert!(!enemy.explode(&tuning, &mut shake));

        enemy.update(1.0);
        assert_eq!(enemy.pos.x, 500.0);
        assert!(enemy.try_shoot(10.0, &mut rng, &tuning).is_none());
    }

    #[test]
    fn test_fires_and_redraws_clock() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut enemy = Enemy::new(Vec2::new(500.0, 100.0), 0.0, Tier::Three, (0.5, 1.0), &tuning);

        assert!(enemy.try_shoot(0.25, &mut rng, &tuning).is_none());
        let bullet = enemy.try_shoot(0.25, &mut rng, &tuning).expect("clock expired");
        assert_eq!(bullet.side, Side::Hostile);
        assert!(bullet.vel_y > 0.0);
        assert_eq!(bullet.pos, Vec2::new(500.0, 134.0));

        let clock = enemy.shoot_clock.remaining();
        assert!((0.5..=1.0).contains(&clock));
    }

    #[test]
    fn test_spawn_inside_band() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..100 {
            let enemy = Enemy::spawn(&mut rng, 3, &tuning);
            let b = enemy.bounds();
            assert!(b.left() >= 0.0 && b.right() <= tuning.screen_w);
            assert!(b.top() >= 40.0 && b.top() <= 230.0);
            let speed = enemy_speed(enemy.tier, 3, &tuning);
            assert!((enemy.vel_x.abs() - speed).abs() <= 30.0 + 1e-3);
            assert_eq!(enemy.score_value, enemy.tier.score_value());
        }
    }

    proptest! {
        #[test]
        fn prop_cooldown_floor_holds(wave in 0u32..500, n in 1u8..=4) {
            let tuning = Tuning::default();
            let (min, max) = cooldown_range(Tier::from_number(n), wave, &tuning);
            prop_assert!(min >= 0.4);
            prop_assert!(max >= 1.0);
            prop_assert!(max >= min);
        }
    }
}
