//! Wave progression: break timer, batch spawning, and clear detection

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::entity::Countdown;
use super::projectile::Bullet;
use crate::tuning::Tuning;

/// Enemies spawned for a wave, capped
pub fn spawn_count(wave: u32, tuning: &Tuning) -> u32 {
    (tuning.wave_base_count + wave).min(tuning.wave_max_count)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveDirector {
    /// Current wave number (1-based)
    pub wave: u32,
    /// Enemies move and shoot only while active
    pub active: bool,
    /// Break before the next wave; only runs while inactive
    pub cooldown: Countdown,
}

impl WaveDirector {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            wave: 1,
            active: false,
            cooldown: Countdown::new(tuning.first_wave_delay),
        }
    }

    /// Run the break timer. When it expires, wipe the field and spawn the
    /// next batch. Returns the number of enemies spawned.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        enemies: &mut Vec<Enemy>,
        bullets: &mut Vec<Bullet>,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<u32> {
        if self.active {
            return None;
        }
        self.cooldown.tick(dt);
        if self.cooldown.is_active() {
            return None;
        }

        enemies.clear();
        bullets.clear();

        let count = spawn_count(self.wave, tuning);
        enemies.extend((0..count).map(|_| Enemy::spawn(rng, self.wave, tuning)));
        self.active = true;
        self.cooldown.clear();

        log::info!("Wave {} started with {} enemies", self.wave, count);
        Some(count)
    }

    /// Detect a full clear. Advances the wave, starts the break, and drops
    /// surviving friendly bullets. Returns the wave number just cleared.
    pub fn check_cleared(
        &mut self,
        enemies: &[Enemy],
        bullets: &mut Vec<Bullet>,
        tuning: &Tuning,
    ) -> Option<u32> {
        if !self.active || !enemies.is_empty() {
            return None;
        }

        let cleared = self.wave;
        self.wave += 1;
        self.active = false;
        self.cooldown.set(tuning.wave_break);
        bullets.retain(|b| !b.is_friendly());

        log::info!("Wave {} cleared, next wave in {:.1}s", cleared, tuning.wave_break);
        Some(cleared)
    }
}
