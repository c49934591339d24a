//! Sound cue dispatch
//!
//! The simulation only emits `GameEvent`s. This module turns them into sound
//! cues and hands them to whatever playback backend the platform provides.
//! Without a backend every cue is dropped; playback is never awaited.

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, PowerUpKind, Tier};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player blaster
    PlayerShot,
    /// Enemy blaster, one voice per tier
    EnemyShot(Tier),
    /// Enemy destroyed
    Explosion,
    /// Asteroid shattered
    AsteroidBreak,
    /// Player took damage
    PlayerHit,
    /// Power-up collected
    PowerUp(PowerUpKind),
    /// New wave rolling in
    WaveStart,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerFired { .. } => Some(SoundEffect::PlayerShot),
            GameEvent::EnemyFired { tier } => Some(SoundEffect::EnemyShot(*tier)),
            GameEvent::EnemyExploded { .. } => Some(SoundEffect::Explosion),
            GameEvent::AsteroidDestroyed { .. } => Some(SoundEffect::AsteroidBreak),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHit),
            GameEvent::PowerUpCollected { kind } => Some(SoundEffect::PowerUp(*kind)),
            GameEvent::WaveStarted { .. } => Some(SoundEffect::WaveStart),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::PhaseChanged { .. }
            | GameEvent::PowerUpSpawned { .. }
            | GameEvent::WaveCleared { .. } => None,
        }
    }

    /// Relative loudness of this cue before user volume
    fn base_gain(self) -> f32 {
        match self {
            SoundEffect::PlayerShot => 0.5,
            SoundEffect::EnemyShot(_) => 0.4,
            SoundEffect::Explosion | SoundEffect::GameOver => 1.0,
            _ => 0.8,
        }
    }
}

/// Platform playback device
pub trait AudioBackend {
    /// Fire-and-forget playback at `volume` in [0, 1]
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs cues, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {:?} @ {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Background music is paused with the game
    music_paused: bool,
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend available - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            music_paused: false,
        }
    }

    /// Pick up volume and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn music_paused(&self) -> bool {
        self.music_paused
    }

    /// Play a single cue
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let volume = effect.base_gain() * self.master_volume * self.sfx_volume;
        if let Some(backend) = self.backend.as_mut() {
            backend.play(effect, volume);
        }
    }

    /// Dispatch every cue for a tick's events; returns how many were played
    pub fn handle_events(&mut self, events: &[GameEvent]) -> usize {
        let mut played = 0;
        for event in events {
            if let GameEvent::PhaseChanged { to, .. } = event {
                self.music_paused = matches!(to, GamePhase::Paused | GamePhase::GameOver);
            }
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
                played += 1;
            }
        }
        played
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    #[test]
    fn test_enemy_shot_carries_tier() {
        let event = GameEvent::EnemyFired { tier: Tier::Three };
        assert_eq!(SoundEffect::for_event(&event), Some(SoundEffect::EnemyShot(Tier::Three)));
        assert_eq!(SoundEffect::for_event(&GameEvent::WaveCleared { wave: 1 }), None);
    }

    #[test]
    fn test_handle_events_plays_cues() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Some(Box::new(recorder.clone())));
        let played = audio.handle_events(&[
            GameEvent::PlayerFired { bullets: 1 },
            GameEvent::PowerUpCollected {
                kind: PowerUpKind::Shield,
            },
            GameEvent::WaveCleared { wave: 1 },
        ]);
        assert_eq!(played, 2);
        let log = recorder.0.borrow();
        assert_eq!(log[0].0, SoundEffect::PlayerShot);
        assert_eq!(log[1].0, SoundEffect::PowerUp(PowerUpKind::Shield));
        assert!((log[0].1 - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_mute_and_missing_backend_are_silent() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Some(Box::new(recorder.clone())));
        audio.apply_settings(&Settings {
            muted: true,
            ..Settings::default()
        });
        audio.play(SoundEffect::Explosion);
        assert!(recorder.0.borrow().is_empty());

        let mut silent = AudioManager::new(None);
        assert!(!silent.is_enabled());
        assert_eq!(silent.handle_events(&[GameEvent::PlayerHit { lives: 2, fatal: false }]), 1);
    }

    #[test]
    fn test_music_follows_pause() {
        let mut audio = AudioManager::new(Some(Box::new(LogBackend)));
        audio.handle_events(&[GameEvent::PhaseChanged {
            from: GamePhase::Playing,
            to: GamePhase::Paused,
        }]);
        assert!(audio.music_paused());
        audio.handle_events(&[GameEvent::PhaseChanged {
            from: GamePhase::Paused,
            to: GamePhase::Playing,
        }]);
        assert!(!audio.music_paused());
    }
}
