//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, one stream per session
//! - Stable iteration order (container insertion order)
//! - No rendering, audio, or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod particle;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod shake;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use asteroid::Asteroid;
pub use enemy::{Enemy, Tier, cooldown_range, enemy_speed};
pub use entity::{Aabb, Body, Countdown};
pub use particle::{Explosion, Particle, ParticleKind};
pub use player::{HitResult, Player};
pub use powerup::{PowerUp, PowerUpKind};
pub use projectile::{Bullet, Side};
pub use shake::ScreenShake;
pub use snapshot::RenderSnapshot;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use wave::{WaveDirector, spawn_count};
