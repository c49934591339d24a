//! Collision and interaction resolution
//!
//! Runs once per tick after all motion, in a fixed order:
//! 1. friendly bullets vs enemies
//! 2. friendly bullets vs asteroids
//! 3. hostile bullets vs player
//! 4. asteroids vs player
//! 5. power-ups vs player
//!
//! Every test is an AABB overlap on post-motion positions. A body killed in an
//! earlier step is skipped by every later one.

use super::entity::Body;
use super::particle::{Explosion, burst};
use super::player::HitResult;
use super::powerup::PowerUp;
use super::state::{GameEvent, GamePhase, GameState};

/// Resolve every interaction for this tick
pub fn resolve(state: &mut GameState) {
    friendly_bullets_vs_enemies(state);
    friendly_bullets_vs_asteroids(state);

    if hostile_bullets_vs_player(state) {
        state.game_over();
    }
    if asteroids_vs_player(state) {
        state.game_over();
    }
    powerups_vs_player(state);

    state.bullets.retain(|b| b.is_alive());
    state.asteroids.retain(|a| a.is_alive());
    state.powerups.retain(|p| p.is_alive());
}

/// A bullet kills every live enemy it overlaps, not just the first
fn friendly_bullets_vs_enemies(state: &mut GameState) {
    if !state.waves.active {
        return;
    }

    let GameState {
        tuning,
        player,
        enemies,
        bullets,
        powerups,
        explosions,
        particles,
        shake,
        events,
        rng,
        ..
    } = state;

    for bullet in bullets.iter_mut().filter(|b| b.is_friendly() && b.is_alive()) {
        let bullet_box = bullet.bounds();
        let mut any_hit = false;

        for enemy in enemies.iter_mut() {
            if !enemy.is_alive() || !enemy.bounds().overlaps(&bullet_box) {
                continue;
            }
            if !enemy.explode(tuning, shake) {
                continue;
            }
            any_hit = true;

            let pos = enemy.pos;
            player.add_score(enemy.score_value);
            events.push(GameEvent::EnemyExploded {
                pos,
                tier: enemy.tier,
                score: enemy.score_value,
            });
            explosions.push(Explosion::new(pos, enemy.tier, tuning.explosion_time));
            burst(particles, rng, pos, tuning.explosion_particles);

            if let Some(drop) = PowerUp::roll_drop(rng, pos, tuning) {
                events.push(GameEvent::PowerUpSpawned { pos, kind: drop.kind });
                powerups.push(drop);
            }
        }

        if any_hit {
            bullet.kill();
        }
    }

    enemies.retain(|e| e.is_alive());
}

/// A bullet destroys at most one asteroid
fn friendly_bullets_vs_asteroids(state: &mut GameState) {
    let GameState {
        tuning,
        player,
        bullets,
        asteroids,
        events,
        ..
    } = state;

    for bullet in bullets.iter_mut().filter(|b| b.is_friendly() && b.is_alive()) {
        let bullet_box = bullet.bounds();
        if let Some(asteroid) = asteroids
            .iter_mut()
            .find(|a| a.is_alive() && a.bounds().overlaps(&bullet_box))
        {
            bullet.kill();
            asteroid.alive = false;
            player.add_score(tuning.asteroid_score);
            events.push(GameEvent::AsteroidDestroyed { pos: asteroid.pos });
        }
    }
}

/// Returns true on a fatal hit; remaining hostile bullets are left alone
fn hostile_bullets_vs_player(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let GameState {
        tuning,
        player,
        bullets,
        shake,
        events,
        ..
    } = state;

    let player_box = player.bounds();
    for bullet in bullets.iter_mut().filter(|b| !b.is_friendly() && b.is_alive()) {
        if !bullet.bounds().overlaps(&player_box) {
            continue;
        }
        bullet.kill();
        if register_hit(player.hit(tuning, shake), player.lives, events) {
            return true;
        }
    }
    false
}

/// Returns true on a fatal hit
fn asteroids_vs_player(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let GameState {
        tuning,
        player,
        asteroids,
        shake,
        events,
        ..
    } = state;

    let player_box = player.bounds();
    for asteroid in asteroids.iter_mut().filter(|a| a.is_alive()) {
        if !asteroid.bounds().overlaps(&player_box) {
            continue;
        }
        asteroid.alive = false;
        if register_hit(player.hit(tuning, shake), player.lives, events) {
            return true;
        }
    }
    false
}

fn powerups_vs_player(state: &mut GameState) {
    let GameState {
        tuning,
        player,
        powerups,
        events,
        ..
    } = state;

    let player_box = player.bounds();
    for powerup in powerups.iter_mut().filter(|p| p.is_alive()) {
        if powerup.bounds().overlaps(&player_box) {
            player.apply_powerup(powerup.kind, tuning);
            powerup.alive = false;
            events.push(GameEvent::PowerUpCollected { kind: powerup.kind });
        }
    }
}

fn register_hit(result: HitResult, lives: u8, events: &mut Vec<GameEvent>) -> bool {
    if result != HitResult::Ignored {
        events.push(GameEvent::PlayerHit {
            lives,
            fatal: result.is_fatal(),
        });
    }
    result.is_fatal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Enemy, Tier};
    use crate::sim::projectile::{Bullet, Side};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn playing_state(tuning: Tuning) -> GameState {
        let mut state = GameState::with_tuning(7, tuning);
        state.set_phase(GamePhase::Playing);
        state.waves.active = true;
        state.drain_events();
        state
    }

    fn enemy_at(state: &GameState, pos: Vec2, tier: Tier) -> Enemy {
        Enemy::new(pos, 0.0, tier, (1.0, 2.0), &state.tuning)
    }

    fn bullet_at(state: &GameState, pos: Vec2, side: Side) -> Bullet {
        let t = &state.tuning;
        let (vel, size) = match side {
            Side::Friendly => (-t.player_bullet_speed, t.player_bullet_size),
            Side::Hostile => (t.enemy_bullet_speed, t.enemy_bullet_size),
        };
        Bullet::new(pos, vel, size, side, t.screen_h, t.bullet_cull_margin)
    }

    #[test]
    fn test_bullet_kills_all_overlapping_enemies() {
        let mut state = playing_state(Tuning {
            powerup_chance: 0.0,
            ..Tuning::default()
        });
        let a = enemy_at(&state, Vec2::new(300.0, 150.0), Tier::One);
        let b = enemy_at(&state, Vec2::new(310.0, 160.0), Tier::Four);
        let far = enemy_at(&state, Vec2::new(900.0, 150.0), Tier::Two);
        state.enemies = vec![a, b, far];
        state.bullets.push(bullet_at(&state, Vec2::new(305.0, 155.0), Side::Friendly));

        resolve(&mut state);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].tier, Tier::Two);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.target_score, 60 + 110);
        assert_eq!(state.explosions.len(), 2);
        assert_eq!(state.particles.len(), 32);
        assert_eq!(state.shake.intensity, 11.0);
        let exploded = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyExploded { .. }))
            .count();
        assert_eq!(exploded, 2);
    }

    #[test]
    fn test_killed_enemy_not_hit_twice() {
        let mut state = playing_state(Tuning {
            powerup_chance: 0.0,
            ..Tuning::default()
        });
        state.enemies = vec![enemy_at(&state, Vec2::new(300.0, 150.0), Tier::Three)];
        state.bullets.push(bullet_at(&state, Vec2::new(300.0, 150.0), Side::Friendly));
        state.bullets.push(bullet_at(&state, Vec2::new(302.0, 150.0), Side::Friendly));

        resolve(&mut state);

        assert!(state.enemies.is_empty());
        assert_eq!(state.player.target_score, 95);
        // Second bullet found nothing left to hit
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_enemies_immune_between_waves() {
        let mut state = playing_state(Tuning::default());
        state.waves.active = false;
        state.enemies = vec![enemy_at(&state, Vec2::new(300.0, 150.0), Tier::One)];
        state.bullets.push(bullet_at(&state, Vec2::new(300.0, 150.0), Side::Friendly));

        resolve(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_bullet_destroys_only_first_asteroid() {
        let mut state = playing_state(Tuning::default());
        state.feed_asteroid(Vec2::new(500.0, 300.0), Vec2::ZERO, Vec2::splat(40.0), 0);
        state.feed_asteroid(Vec2::new(505.0, 300.0), Vec2::ZERO, Vec2::splat(40.0), 1);
        state.bullets.push(bullet_at(&state, Vec2::new(500.0, 300.0), Side::Friendly));

        resolve(&mut state);

        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].sprite, 1);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.target_score, 10);
    }

    #[test]
    fn test_hostile_bullet_hits_player() {
        let mut state = playing_state(Tuning::default());
        let pos = state.player.pos;
        state.bullets.push(bullet_at(&state, pos, Side::Hostile));
        state.bullets.push(bullet_at(&state, pos, Side::Hostile));

        resolve(&mut state);

        // Second bullet lands during invulnerability and is spent for nothing
        assert_eq!(state.player.lives, 4);
        assert!(state.bullets.is_empty());
        assert_eq!(
            state.events,
            vec![GameEvent::PlayerHit {
                lives: 4,
                fatal: false
            }]
        );
    }

    #[test]
    fn test_fatal_hit_stops_hostile_checks() {
        let mut state = playing_state(Tuning::default());
        state.player.lives = 1;
        let pos = state.player.pos;
        state.bullets.push(bullet_at(&state, pos, Side::Hostile));
        state.bullets.push(bullet_at(&state, pos, Side::Hostile));

        resolve(&mut state);

        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        // The second bullet was never tested
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_asteroid_hits_player() {
        let mut state = playing_state(Tuning::default());
        let pos = state.player.pos;
        state.feed_asteroid(pos, Vec2::ZERO, Vec2::splat(40.0), 0);

        resolve(&mut state);

        assert!(state.asteroids.is_empty());
        assert_eq!(state.player.lives, 4);
    }

    #[test]
    fn test_shield_blocks_damage() {
        let mut state = playing_state(Tuning::default());
        state.player.shield.set(1.0);
        let pos = state.player.pos;
        state.bullets.push(bullet_at(&state, pos, Side::Hostile));

        resolve(&mut state);

        assert_eq!(state.player.lives, 5);
        assert!(state.bullets.is_empty(), "bullet is still consumed");
        assert!(state.events.is_empty());
    }
}
