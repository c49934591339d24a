//! Void Defender - A wave-based arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, waves, collisions, game state)
//! - `audio`: Sound cue mapping for an external playback backend
//! - `platform`: Fixed timestep driver and input latching
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences (never affect the simulation)

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Playfield dimensions (pixels, origin top-left, y grows downward)
    pub const SCREEN_W: f32 = 1200.0;
    pub const SCREEN_H: f32 = 700.0;

    /// Upper bound of the lives domain
    pub const LIVES_CAP: u8 = 7;

    /// Hard cap on cosmetic particles
    pub const MAX_PARTICLES: usize = 512;
}

/// Uniform sample in `[lo, hi]`, tolerating a degenerate or inverted range
#[inline]
pub fn uniform<R: rand::Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        lo
    }
}

/// Uniform point inside the rectangle spanned by `min` and `max`
#[inline]
pub fn uniform_point<R: rand::Rng + ?Sized>(rng: &mut R, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(uniform(rng, min.x, max.x), uniform(rng, min.y, max.y))
}
