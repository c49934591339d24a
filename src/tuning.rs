//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be rebalanced from a JSON
//! file without touching the simulation. Missing fields fall back to the
//! shipped defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LIVES_CAP, SCREEN_H, SCREEN_W};

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_w: f32,
    pub screen_h: f32,

    // === Player ===
    /// Horizontal speed (px/s)
    pub player_speed: f32,
    pub player_size: Vec2,
    /// Gap between the player's bottom edge and the screen bottom
    pub player_bottom_margin: f32,
    pub fire_cooldown: f32,
    pub rapid_fire_cooldown: f32,
    /// Horizontal offsets of the three rapid-fire bullets
    pub rapid_spread: [f32; 3],
    pub start_lives: u8,
    pub max_lives: u8,
    pub invulnerable_time: f32,
    pub flash_time: f32,
    pub spark_time: f32,
    pub rapid_max: f32,
    pub shield_max: f32,
    /// Max points the displayed score climbs per tick
    pub score_step: u64,
    pub hit_shake: (f32, f32),
    /// Seconds of engine time between trail particles
    pub engine_trail_interval: f32,
    /// Per-tick chance of a damage spark while sparking
    pub spark_chance: f64,

    // === Bullets ===
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    pub player_bullet_size: Vec2,
    pub enemy_bullet_size: Vec2,
    /// Extra distance beyond the screen edge before a bullet is culled
    pub bullet_cull_margin: f32,

    // === Enemies ===
    pub enemy_size: Vec2,
    pub enemy_base_speed: f32,
    pub enemy_speed_per_wave: f32,
    pub enemy_speed_per_tier: f32,
    pub enemy_speed_jitter: f32,
    /// Vertical band (top edge) enemies spawn in
    pub enemy_spawn_band: (f32, f32),
    pub enemy_cooldown_base: (f32, f32),
    pub enemy_cooldown_shrink_per_wave: (f32, f32),
    pub enemy_cooldown_shrink_per_tier: f32,
    pub enemy_cooldown_floor: (f32, f32),
    pub explosion_shake: (f32, f32),
    /// Explosion animation length (10 frames at 40 fps)
    pub explosion_time: f32,
    pub explosion_particles: u32,

    // === Waves ===
    pub first_wave_delay: f32,
    pub wave_break: f32,
    pub wave_base_count: u32,
    pub wave_max_count: u32,

    // === Power-ups ===
    pub powerup_chance: f64,
    pub powerup_fall_speed: f32,
    pub powerup_ttl: f32,
    pub powerup_size: Vec2,

    // === Asteroids ===
    pub asteroid_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_w: SCREEN_W,
            screen_h: SCREEN_H,

            player_speed: 420.0,
            player_size: Vec2::new(84.0, 84.0),
            player_bottom_margin: 28.0,
            fire_cooldown: 0.18,
            rapid_fire_cooldown: 0.09,
            rapid_spread: [-12.0, 0.0, 12.0],
            start_lives: 5,
            max_lives: 7,
            invulnerable_time: 1.1,
            flash_time: 0.25,
            spark_time: 0.6,
            rapid_max: 7.0,
            shield_max: 5.5,
            score_step: 50,
            hit_shake: (7.0, 0.22),
            engine_trail_interval: 0.05,
            spark_chance: 0.35,

            player_bullet_speed: 880.0,
            enemy_bullet_speed: 400.0,
            player_bullet_size: Vec2::new(10.0, 24.0),
            enemy_bullet_size: Vec2::new(12.0, 24.0),
            bullet_cull_margin: 60.0,

            enemy_size: Vec2::new(80.0, 80.0),
            enemy_base_speed: 140.0,
            enemy_speed_per_wave: 10.0,
            enemy_speed_per_tier: 10.0,
            enemy_speed_jitter: 30.0,
            enemy_spawn_band: (40.0, 230.0),
            enemy_cooldown_base: (0.9, 2.2),
            enemy_cooldown_shrink_per_wave: (0.05, 0.1),
            enemy_cooldown_shrink_per_tier: 0.05,
            enemy_cooldown_floor: (0.4, 1.0),
            explosion_shake: (11.0, 0.25),
            explosion_time: 0.25,
            explosion_particles: 16,

            first_wave_delay: 2.0,
            wave_break: 3.0,
            wave_base_count: 6,
            wave_max_count: 22,

            powerup_chance: 0.16,
            powerup_fall_speed: 140.0,
            powerup_ttl: 9.0,
            powerup_size: Vec2::new(26.0, 26.0),

            asteroid_score: 10,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON (unspecified fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        let non_neg = |v: &mut f32| *v = v.max(0.0);

        self.screen_w = self.screen_w.max(self.player_size.x.max(self.enemy_size.x));
        self.screen_h = self.screen_h.max(1.0);
        for v in [
            &mut self.player_speed,
            &mut self.fire_cooldown,
            &mut self.rapid_fire_cooldown,
            &mut self.invulnerable_time,
            &mut self.flash_time,
            &mut self.spark_time,
            &mut self.rapid_max,
            &mut self.shield_max,
            &mut self.engine_trail_interval,
            &mut self.player_bullet_speed,
            &mut self.enemy_bullet_speed,
            &mut self.bullet_cull_margin,
            &mut self.enemy_base_speed,
            &mut self.enemy_speed_jitter,
            &mut self.explosion_time,
            &mut self.first_wave_delay,
            &mut self.wave_break,
            &mut self.powerup_fall_speed,
            &mut self.powerup_ttl,
        ] {
            non_neg(v);
        }
        self.powerup_chance = probability(self.powerup_chance);
        self.spark_chance = probability(self.spark_chance);
        self.max_lives = self.max_lives.clamp(1, LIVES_CAP);
        self.start_lives = self.start_lives.clamp(1, self.max_lives);
        self.score_step = self.score_step.max(1);
        self.wave_max_count = self.wave_max_count.max(1);
        self.enemy_cooldown_floor.0 = self.enemy_cooldown_floor.0.max(0.0);
        self.enemy_cooldown_floor.1 = self.enemy_cooldown_floor.1.max(self.enemy_cooldown_floor.0);

        self
    }
}

/// Bernoulli parameter in [0, 1]; NaN counts as never
fn probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}
