//! Fixed timestep simulation tick
//!
//! Dispatches on the session phase and, while playing, advances every system
//! in a fixed order: player, wave director, enemies, free bodies, collisions,
//! wave-clear check, camera shake.

use rand::Rng;

use super::collision;
use super::entity::Body;
use super::particle::{Particle, push_capped};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
///
/// Direction keys are held state; everything else is a one-shot event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Fire pressed this tick
    pub fire: bool,
    /// Fire key currently held (visual afterburner only)
    pub fire_held: bool,
    /// Pause toggle
    pub pause: bool,
    /// Leave the menu and start playing
    pub start: bool,
    /// Return to the menu after a game over
    pub restart: bool,
}

impl TickInput {
    /// Horizontal direction in {-1, 0, 1}
    pub fn direction(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.set_phase(GamePhase::Playing);
            }
            return;
        }
        GamePhase::Paused => {
            if input.pause {
                state.set_phase(GamePhase::Playing);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.reset();
                state.set_phase(GamePhase::Menu);
            }
            return;
        }
        GamePhase::Playing => {
            if input.pause {
                state.set_phase(GamePhase::Paused);
                return;
            }
        }
    }

    step_playing(state, input, dt);
}

fn step_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    update_player(state, input, dt);

    if let Some(enemies) = state.waves.update(
        dt,
        &mut state.enemies,
        &mut state.bullets,
        &mut state.rng,
        &state.tuning,
    ) {
        state.events.push(GameEvent::WaveStarted {
            wave: state.waves.wave,
            enemies,
        });
    }

    if state.waves.active {
        update_enemies(state, dt);
    }

    update_free_bodies(state, dt);

    collision::resolve(state);

    if let Some(wave) = state
        .waves
        .check_cleared(&state.enemies, &mut state.bullets, &state.tuning)
    {
        state.events.push(GameEvent::WaveCleared { wave });
    }

    state.shake.update(dt);
    state.shake_offset = state.shake.offset(&mut state.rng);
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.update(dt, input.direction(), input.fire_held, tuning);

    if input.fire {
        let shots = player.shoot(tuning);
        if !shots.is_empty() {
            state.events.push(GameEvent::PlayerFired {
                bullets: shots.len() as u8,
            });
            state.bullets.extend(shots);
        }
    }

    if player.take_engine_pulse(tuning.engine_trail_interval) {
        let exhaust = player.bounds();
        let nozzle = glam::Vec2::new(exhaust.center().x, exhaust.bottom());
        let shooting = player.is_shooting;
        push_capped(&mut state.particles, Particle::exhaust(&mut state.rng, nozzle, shooting));
    }

    if player.spark.is_active() && state.rng.random_bool(tuning.spark_chance) {
        let hull = player.bounds();
        push_capped(&mut state.particles, Particle::spark(&mut state.rng, hull));
    }
}

fn update_enemies(state: &mut GameState, dt: f32) {
    for enemy in state.enemies.iter_mut() {
        enemy.update(dt);
        if let Some(bullet) = enemy.try_shoot(dt, &mut state.rng, &state.tuning) {
            state.events.push(GameEvent::EnemyFired { tier: enemy.tier });
            state.bullets.push(bullet);
        }
    }
}

/// Bullets, visuals, power-ups, and asteroids: move, then drop the dead
fn update_free_bodies(state: &mut GameState, dt: f32) {
    advance(&mut state.bullets, dt);
    advance(&mut state.explosions, dt);
    advance(&mut state.particles, dt);
    advance(&mut state.powerups, dt);
    advance(&mut state.asteroids, dt);
}

fn advance<B: Body>(bodies: &mut Vec<B>, dt: f32) {
    for body in bodies.iter_mut() {
        body.update(dt);
    }
    bodies.retain(|b| b.is_alive());
}
