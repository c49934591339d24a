//! Read-only view of a session for the renderer
//!
//! Built from `GameState` after each tick; never mutates it.

use glam::Vec2;
use serde::Serialize;

use super::particle::ParticleKind;
use super::powerup::PowerUpKind;
use super::projectile::Side;
use super::state::{GamePhase, GameState};
use crate::settings::Settings;

/// Explosion sprite sheet playback rate
const EXPLOSION_FPS: f32 = 40.0;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub flashing: bool,
    pub shielded: bool,
    pub invulnerable: bool,
    pub shooting: bool,
    /// Rapid-fire bar fill in [0, 1]
    pub rapid: f32,
    /// Shield bar fill in [0, 1]
    pub shield: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub size: Vec2,
    pub tier: u8,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub size: Vec2,
    pub side: Side,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub kind: ParticleKind,
    /// Remaining life in [0, 1]
    pub life: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplosionView {
    pub pos: Vec2,
    pub tier: u8,
    pub life: f32,
    /// Sprite sheet frame
    pub frame: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub size: Vec2,
    pub sprite: u8,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub wave: u32,
    /// Show the "WAVE n" banner
    pub between_waves: bool,
    pub score: u64,
    pub lives: u8,
    pub shake_offset: (i32, i32),
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
    pub explosions: Vec<ExplosionView>,
    pub powerups: Vec<PowerUpView>,
    pub asteroids: Vec<AsteroidView>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        let player = &state.player;
        let tuning = &state.tuning;

        let shake_offset = if settings.effective_screen_shake() {
            state.shake_offset
        } else {
            (0, 0)
        };

        Self {
            phase: state.phase,
            wave: state.waves.wave,
            between_waves: !state.waves.active,
            score: player.score,
            lives: player.lives,
            shake_offset,
            player: PlayerView {
                pos: player.pos,
                size: player.size,
                flashing: player.is_flashing(),
                shielded: player.is_shielded(),
                invulnerable: player.is_invulnerable(),
                shooting: player.is_shooting,
                rapid: player.rapid.fraction_of(tuning.rapid_max),
                shield: player.shield.fraction_of(tuning.shield_max),
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    size: e.size,
                    tier: e.tier.number(),
                    alive: e.alive,
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos,
                    size: b.size,
                    side: b.side,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .take(settings.max_particles())
                .map(|p| ParticleView {
                    pos: p.pos,
                    kind: p.kind,
                    life: p.life_fraction(),
                })
                .collect(),
            explosions: state
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    pos: e.pos,
                    tier: e.tier.number(),
                    life: e.life_fraction(),
                    frame: e.frame(EXPLOSION_FPS),
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerUpView { pos: p.pos, kind: p.kind })
                .collect(),
            asteroids: state
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    pos: a.pos,
                    size: a.size,
                    sprite: a.sprite,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerup::PowerUp;

    #[test]
    fn test_capture_reflects_state() {
        let mut state = GameState::new(5);
        state.set_phase(GamePhase::Playing);
        state.player.shield.set(state.tuning.shield_max / 2.0);
        let drop = PowerUp::new(Vec2::new(10.0, 20.0), PowerUpKind::Rapid, &state.tuning);
        state.powerups.push(drop);

        let snap = RenderSnapshot::capture(&state, &Settings::default());
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.lives, 5);
        assert!(snap.between_waves);
        assert!(snap.player.shielded);
        assert!((snap.player.shield - 0.5).abs() < 1e-6);
        assert_eq!(snap.player.rapid, 0.0);
        assert_eq!(snap.powerups.len(), 1);
        assert_eq!(snap.powerups[0].kind, PowerUpKind::Rapid);
    }

    #[test]
    fn test_reduced_motion_hides_shake() {
        let mut state = GameState::new(5);
        state.shake_offset = (3, -2);

        let snap = RenderSnapshot::capture(&state, &Settings::default());
        assert_eq!(snap.shake_offset, (3, -2));

        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let snap = RenderSnapshot::capture(&state, &calm);
        assert_eq!(snap.shake_offset, (0, 0));
    }

    #[test]
    fn test_serializes_to_json() {
        let state = GameState::new(5);
        let json = serde_json::to_value(RenderSnapshot::capture(&state, &Settings::default()))
            .expect("serialize");
        assert_eq!(json["phase"], "Menu");
        assert_eq!(json["wave"], 1);
    }
}
