//! Void Defender headless driver
//!
//! Runs the simulation at a fixed cadence with an optional autopilot, routes
//! events to the audio layer, and can print the final render snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use void_defender::audio::{AudioManager, LogBackend};
use void_defender::consts::SIM_DT;
use void_defender::platform::{FixedStepper, InputLatch};
use void_defender::settings::QualityPreset;
use void_defender::sim::{GameEvent, GamePhase, GameState, RenderSnapshot, Side};
use void_defender::{Settings, Tuning, uniform};

/// Ticks between asteroids dropped by the driver's feed
const ASTEROID_INTERVAL: u64 = 600;
/// How far above the ship an enemy bullet counts as a threat
const DODGE_RANGE: f32 = 160.0;

#[derive(Parser, Debug)]
#[command(name = "void-defender")]
#[command(about = "Headless runner for the Void Defender simulation")]
struct Cli {
    /// Session seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Number of simulation ticks to run (60 per second)
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,
    /// JSON file with tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// JSON file with presentation settings
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Particle quality (low, medium, high)
    #[arg(long)]
    quality: Option<QualityPreset>,
    /// Only press start; no steering or firing
    #[arg(long)]
    no_autopilot: bool,
    /// Print the final render snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => {
            let raw = read_file(path, "tuning")?;
            let tuning = Tuning::from_json(&raw)
                .with_context(|| format!("failed to parse tuning file {}", path.display()))?;
            log::info!("Loaded tuning overrides from {}", path.display());
            tuning
        }
        None => Tuning::default(),
    };

    let mut settings = match &cli.settings {
        Some(path) => {
            let raw = read_file(path, "settings")?;
            Settings::from_json(&raw)
                .with_context(|| format!("failed to parse settings file {}", path.display()))?
        }
        None => Settings::default(),
    };
    if let Some(quality) = cli.quality {
        settings.quality = quality;
    }

    log::info!(
        "Void Defender starting (seed {}, {} ticks, quality {})",
        cli.seed,
        cli.ticks,
        settings.quality
    );

    let mut state = GameState::with_tuning(cli.seed, tuning);
    let mut audio = AudioManager::new(Some(Box::new(LogBackend)));
    audio.apply_settings(&settings);

    let mut latch = InputLatch::new();
    let mut stepper = FixedStepper::new();
    // Separate stream so the feed never perturbs the session RNG
    let mut feed_rng = Pcg32::seed_from_u64(cli.seed ^ 0xA57E_801D);
    let mut games = 0u32;

    if cli.ticks == 0 {
        latch.request_quit();
    }

    while !latch.quit_requested() {
        if cli.no_autopilot {
            if state.phase == GamePhase::Menu {
                latch.press_start();
            }
        } else {
            autopilot(&state, &mut latch);
        }

        let feed_due = state.time_ticks > 0 && state.time_ticks % ASTEROID_INTERVAL == 0;
        if state.phase == GamePhase::Playing && feed_due {
            feed_asteroid(&mut state, &mut feed_rng);
        }

        stepper.advance(SIM_DT, &mut state, &mut latch);

        let events = state.drain_events();
        for event in &events {
            log::debug!("{:?}", event);
            if let GameEvent::GameOver { score, wave } = event {
                games += 1;
                log::info!("Game {} over: score {}, wave {}", games, score, wave);
            }
        }
        audio.handle_events(&events);

        if stepper.ticks() >= cli.ticks {
            latch.request_quit();
        }
    }

    log::info!(
        "Stopped after {} ticks: phase {:?}, wave {}, score {}, lives {}",
        stepper.ticks(),
        state.phase,
        state.wave(),
        state.player.score,
        state.lives()
    );

    if cli.snapshot {
        let snapshot = RenderSnapshot::capture(&state, &settings);
        let json =
            serde_json::to_string_pretty(&snapshot).context("failed to serialize snapshot")?;
        println!("{json}");
    }

    Ok(())
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file {}", path.display()))
}

/// Simple scripted pilot: chase the nearest enemy, dodge close shots, fire on cooldown
fn autopilot(state: &GameState, latch: &mut InputLatch) {
    match state.phase {
        GamePhase::Menu => latch.press_start(),
        GamePhase::GameOver => latch.press_restart(),
        GamePhase::Paused => latch.press_pause(),
        GamePhase::Playing => {
            let ship = state.player.bounds();
            let center = ship.center().x;

            let threat = state
                .bullets
                .iter()
                .filter(|b| b.side == Side::Hostile && b.pos.y < ship.top())
                .filter(|b| ship.top() - b.pos.y < DODGE_RANGE)
                .filter(|b| (b.pos.x - center).abs() < ship.size().x)
                .map(|b| b.pos.x)
                .next();

            let target = state
                .enemies
                .iter()
                .filter(|e| e.alive)
                .map(|e| e.pos.x)
                .min_by(|a, b| (a - center).abs().total_cmp(&(b - center).abs()));

            let (left, right) = match (threat, target) {
                (Some(x), _) => (x >= center, x < center),
                (None, Some(x)) => (x < center - 8.0, x > center + 8.0),
                (None, None) => (false, false),
            };
            let fire = target.is_some() && state.player.can_shoot();

            latch.set_held(left, right, fire);
            if fire {
                latch.press_fire();
            }
        }
    }
}

/// Drop an asteroid from above at a random column
fn feed_asteroid(state: &mut GameState, rng: &mut Pcg32) {
    let size = rng.random_range(36.0..72.0);
    let pos = Vec2::new(uniform(rng, size, state.tuning.screen_w - size), -size);
    let vel = Vec2::new(rng.random_range(-40.0..40.0), rng.random_range(90.0..180.0));
    let sprite = rng.random_range(0..4);
    log::debug!("Feeding asteroid at {:.0}", pos.x);
    state.feed_asteroid(pos, vel, Vec2::splat(size), sprite);
}
