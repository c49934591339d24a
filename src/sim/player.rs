//! The player's ship
//!
//! All timers run concurrently; none of them exclude the others.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Countdown};
use super::powerup::PowerUpKind;
use super::projectile::{Bullet, Side};
use super::shake::ScreenShake;
use crate::tuning::Tuning;

/// Outcome of a hit against the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Invulnerable or shielded, nothing happened
    Ignored,
    /// Lost a life, still in the game
    Damaged,
    /// Lost the last life
    Fatal,
}

impl HitResult {
    pub fn is_fatal(self) -> bool {
        self == HitResult::Fatal
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub lives: u8,
    /// Displayed score, climbs toward `target_score`
    pub score: u64,
    /// Score actually earned
    pub target_score: u64,
    pub cooldown: Countdown,
    pub invulnerable: Countdown,
    pub flash: Countdown,
    pub rapid: Countdown,
    pub shield: Countdown,
    /// Damage spark effect after a hit
    pub spark: Countdown,
    /// Engine pulse clock (seconds since last trail particle)
    pub engine_t: f32,
    /// Fire held and able to shoot (renderer uses it for the afterburner)
    pub is_shooting: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let size = tuning.player_size;
        Self {
            pos: Vec2::new(
                tuning.screen_w / 2.0,
                tuning.screen_h - tuning.player_bottom_margin - size.y / 2.0,
            ),
            size,
            lives: tuning.start_lives,
            score: 0,
            target_score: 0,
            cooldown: Countdown::ZERO,
            invulnerable: Countdown::ZERO,
            flash: Countdown::ZERO,
            rapid: Countdown::ZERO,
            shield: Countdown::ZERO,
            spark: Countdown::ZERO,
            engine_t: 0.0,
            is_shooting: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Move, run down every timer, and advance the score count-up.
    ///
    /// `dir` is `right - left` in {-1, 0, 1}.
    pub fn update(&mut self, dt: f32, dir: f32, fire_held: bool, tuning: &Tuning) {
        let half_w = self.size.x / 2.0;
        let max_x = (tuning.screen_w - half_w).max(half_w);
        let dx = dir.clamp(-1.0, 1.0) * tuning.player_speed * dt;
        self.pos.x = (self.pos.x + dx).clamp(half_w, max_x);

        self.cooldown.tick(dt);
        self.invulnerable.tick(dt);
        self.flash.tick(dt);
        self.rapid.tick(dt);
        self.shield.tick(dt);
        self.spark.tick(dt);
        self.engine_t += dt;

        self.is_shooting = fire_held && self.can_shoot();

        if self.score < self.target_score {
            self.score += tuning.score_step.min(self.target_score - self.score);
        }
    }

    /// Consume an engine pulse if one is due
    pub fn take_engine_pulse(&mut self, interval: f32) -> bool {
        if self.engine_t > interval {
            self.engine_t = 0.0;
            true
        } else {
            false
        }
    }

    pub fn can_shoot(&self) -> bool {
        !self.cooldown.is_active()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable.is_active()
    }

    pub fn is_shielded(&self) -> bool {
        self.shield.is_active()
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_active()
    }

    /// Fire if the cooldown allows; returns the bullets spawned (empty if not)
    pub fn shoot(&mut self, tuning: &Tuning) -> Vec<Bullet> {
        if !self.can_shoot() {
            return Vec::new();
        }

        let rapid = self.rapid.is_active();
        self.cooldown.set(if rapid {
            tuning.rapid_fire_cooldown
        } else {
            tuning.fire_cooldown
        });

        let origin = Vec2::new(self.pos.x, self.bounds().top() + 10.0);
        let offsets: &[f32] = if rapid { &tuning.rapid_spread } else { &[0.0] };

        offsets
            .iter()
            .map(|&ox| {
                Bullet::new(
                    origin + Vec2::new(ox, 0.0),
                    -tuning.player_bullet_speed,
                    tuning.player_bullet_size,
                    Side::Friendly,
                    tuning.screen_h,
                    tuning.bullet_cull_margin,
                )
            })
            .collect()
    }

    /// Take a hit. Ignored while invulnerable or shielded.
    pub fn hit(&mut self, tuning: &Tuning, shake: &mut ScreenShake) -> HitResult {
        if self.is_invulnerable() || self.is_shielded() {
            return HitResult::Ignored;
        }

        self.lives = self.lives.saturating_sub(1);
        self.invulnerable.set(tuning.invulnerable_time);
        self.flash.set(tuning.flash_time);
        self.spark.set(tuning.spark_time);
        shake.add(tuning.hit_shake.0, tuning.hit_shake.1);

        if self.lives == 0 {
            HitResult::Fatal
        } else {
            HitResult::Damaged
        }
    }

    pub fn apply_powerup(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        match kind {
            PowerUpKind::Heal => self.lives = self.lives.saturating_add(1).min(tuning.max_lives),
            PowerUpKind::Rapid => self.rapid.set(tuning.rapid_max),
            PowerUpKind::Shield => self.shield.set(tuning.shield_max),
        }
    }

    pub fn add_score(&mut self, points: u64) {
        self.target_score = self.target_score.saturating_add(points);
    }
}
