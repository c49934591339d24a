//! Game state and core simulation types
//!
//! A single owned `GameState` holds every entity container and counter for a
//! session. Effects for the renderer and audio are queued as `GameEvent`s and
//! drained by the caller after each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::enemy::{Enemy, Tier};
use super::particle::{Explosion, Particle};
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use super::projectile::Bullet;
use super::shake::ScreenShake;
use super::wave::WaveDirector;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation suspended
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// Discrete things that happened during a tick, for renderer and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    PlayerFired { bullets: u8 },
    EnemyFired { tier: Tier },
    EnemyExploded { pos: Vec2, tier: Tier, score: u64 },
    PowerUpSpawned { pos: Vec2, kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    AsteroidDestroyed { pos: Vec2 },
    PlayerHit { lives: u8, fatal: bool },
    WaveStarted { wave: u32, enemies: u32 },
    WaveCleared { wave: u32 },
    GameOver { score: u64, wave: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    pub player: Player,
    pub waves: WaveDirector,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub powerups: Vec<PowerUp>,
    pub asteroids: Vec<Asteroid>,
    /// Visual only
    pub explosions: Vec<Explosion>,
    /// Visual only
    pub particles: Vec<Particle>,
    pub shake: ScreenShake,
    /// Camera jitter for this frame
    pub shake_offset: (i32, i32),
    /// Events queued since the last drain
    pub events: Vec<GameEvent>,
    /// Single randomness source for the whole session
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_rng(seed, tuning, Pcg32::seed_from_u64(seed))
    }

    /// Create a state around an externally prepared RNG. Out-of-range
    /// tuning values are clamped before the session sees them.
    pub fn with_rng(seed: u64, tuning: Tuning, rng: Pcg32) -> Self {
        let clamped = tuning.clone().sanitized();
        if clamped != tuning {
            log::warn!("Out-of-range tuning values were clamped");
        }
        let tuning = clamped;
        Self {
            seed,
            player: Player::new(&tuning),
            waves: WaveDirector::new(&tuning),
            tuning,
            phase: GamePhase::Menu,
            time_ticks: 0,
            enemies: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            asteroids: Vec::new(),
            explosions: Vec::new(),
            particles: Vec::new(),
            shake: ScreenShake::default(),
            shake_offset: (0, 0),
            events: Vec::new(),
            rng,
        }
    }

    /// Wipe the session back to a fresh run. The RNG keeps its stream and
    /// the tuning is kept.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.tuning);
        self.waves = WaveDirector::new(&self.tuning);
        self.time_ticks = 0;
        self.enemies.clear();
        self.bullets.clear();
        self.powerups.clear();
        self.asteroids.clear();
        self.explosions.clear();
        self.particles.clear();
        self.shake = ScreenShake::default();
        self.shake_offset = (0, 0);
    }

    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::debug!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// End the run after a fatal hit
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let score = self.player.target_score;
        let wave = self.waves.wave;
        log::info!("Game over at wave {} with {} points", wave, score);
        self.set_phase(GamePhase::GameOver);
        self.events.push(GameEvent::GameOver { score, wave });
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand an asteroid from an external spawner to the simulation
    pub fn feed_asteroid(&mut self, pos: Vec2, vel: Vec2, size: Vec2, sprite: u8) {
        let screen = Vec2::new(self.tuning.screen_w, self.tuning.screen_h);
        self.asteroids.push(Asteroid::new(pos, vel, size, sprite, screen));
    }

    pub fn lives(&self) -> u8 {
        self.player.lives
    }

    pub fn wave(&self) -> u32 {
        self.waves.wave
    }

    /// True when nothing is left on the field
    pub fn field_is_empty(&self) -> bool {
        self.enemies.is_empty()
            && self.bullets.is_empty()
            && self.powerups.is_empty()
            && self.asteroids.is_empty()
            && self.explosions.is_empty()
            && self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.lives(), 5);
        assert_eq!(state.wave(), 1);
        assert!(!state.waves.active);
        assert_eq!(state.waves.cooldown.remaining(), 2.0);
        assert!(state.field_is_empty());
    }

    #[test]
    fn test_set_phase_emits_once() {
        let mut state = GameState::new(1);
        state.set_phase(GamePhase::Playing);
        state.set_phase(GamePhase::Playing);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Menu,
                to: GamePhase::Playing
            }]
        );
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_game_over_only_from_playing() {
        let mut state = GameState::new(1);
        state.game_over();
        assert_eq!(state.phase, GamePhase::Menu);

        state.set_phase(GamePhase::Playing);
        state.player.target_score = 420;
        state.game_over();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 420, wave: 1 }));
    }

    #[test]
    fn test_out_of_range_tuning_is_clamped_on_construction() {
        use crate::consts::SIM_DT;
        use crate::sim::projectile::{Bullet, Side};
        use crate::sim::tick::{TickInput, tick};

        let mut state = GameState::with_tuning(
            1,
            Tuning {
                powerup_chance: 1.5,
                spark_chance: 2.0,
                score_step: 0,
                max_lives: u8::MAX,
                ..Tuning::default()
            },
        );
        assert_eq!(state.tuning.powerup_chance, 1.0);
        assert_eq!(state.tuning.spark_chance, 1.0);
        assert_eq!(state.tuning.score_step, 1);
        assert_eq!(state.tuning.max_lives, 7);

        state.set_phase(GamePhase::Playing);
        state.waves.active = true;
        let pos = Vec2::new(600.0, 150.0);
        let enemy = Enemy::new(pos, 0.0, Tier::One, (5.0, 5.0), &state.tuning);
        state.enemies.push(enemy);
        let t = &state.tuning;
        let bullet = Bullet::new(
            pos,
            0.0,
            t.player_bullet_size,
            Side::Friendly,
            t.screen_h,
            t.bullet_cull_margin,
        );
        state.bullets.push(bullet);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.enemies.is_empty());
        assert_eq!(state.powerups.len(), 1, "drop chance clamped to certain");
        assert_eq!(state.player.target_score, 60);

        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.player.score, state.player.target_score);
    }

    #[test]
    fn test_event_json_is_tagged() {
        let json = serde_json::to_string(&GameEvent::WaveCleared { wave: 2 }).expect("serialize");
        assert_eq!(json, r#"{"type":"WaveCleared","wave":2}"#);
    }
}
