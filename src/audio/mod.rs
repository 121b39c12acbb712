//! Audio system
//!
//! Sounds are loaded from optional asset files and played through an
//! [`AudioBackend`]. Playback is fire-and-forget: every failure is logged
//! and dropped so a missing device never stalls the game.

#[cfg(not(target_arch = "wasm32"))]
mod rodio_backend;

#[cfg(not(target_arch = "wasm32"))]
pub use rodio_backend::RodioBackend;

use std::fmt;
use std::io;
use std::path::Path;

use crate::assets::Assets;
use crate::consts::{CATCH_VOLUME, MISS_VOLUME, MUSIC_VOLUME};
use crate::settings::Settings;

/// Sound asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Looping track, sped up with the level
    BackgroundMusic,
    /// Note caught
    Catch,
    /// Note hit the floor
    Miss,
}

impl SoundEffect {
    /// Base volume before settings are applied
    fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::BackgroundMusic => MUSIC_VOLUME,
            SoundEffect::Catch => CATCH_VOLUME,
            SoundEffect::Miss => MISS_VOLUME,
        }
    }
}

#[derive(Debug)]
pub enum AudioError {
    /// No output device or the stream could not be opened
    Unavailable(String),
    /// The file is not a playable sound
    Decode(String),
    Io(io::Error),
    /// Rate change requested with no music running
    NotPlaying,
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Unavailable(msg) => write!(f, "audio output unavailable: {}", msg),
            AudioError::Decode(msg) => write!(f, "could not decode sound: {}", msg),
            AudioError::Io(e) => write!(f, "could not read sound file: {}", e),
            AudioError::NotPlaying => write!(f, "no music is playing"),
        }
    }
}

impl std::error::Error for AudioError {}

impl From<io::Error> for AudioError {
    fn from(e: io::Error) -> Self {
        AudioError::Io(e)
    }
}

/// Playback primitives supplied by the platform
pub trait AudioBackend {
    /// Play a sound once at `volume` (0.0 - 1.0)
    fn play_once(&mut self, effect: SoundEffect, path: &Path, volume: f32)
    -> Result<(), AudioError>;
    /// Start looping a sound, replacing any current loop
    fn start_loop(
        &mut self,
        effect: SoundEffect,
        path: &Path,
        volume: f32,
        rate: f32,
    ) -> Result<(), AudioError>;
    /// Change the playback rate of the running loop
    fn set_loop_rate(&mut self, rate: f32) -> Result<(), AudioError>;
    fn stop_loop(&mut self) -> Result<(), AudioError>;
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    assets: Assets,
    sfx_volume: f32,
    music_volume: f32,
    music_playing: bool,
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>, assets: Assets, settings: &Settings) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            assets,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music_playing: false,
        }
    }

    /// Manager that never makes a sound
    pub fn silent() -> Self {
        Self {
            backend: None,
            assets: Assets::none(),
            sfx_volume: 0.0,
            music_volume: 0.0,
            music_playing: false,
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Play a one-shot sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = effect.base_volume() * self.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        let Some(path) = self.assets.sound(effect) else {
            return;
        };
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.play_once(effect, path, vol) {
            log::warn!("Sound {:?} failed: {}", effect, e);
        }
    }

    /// (Re)start the background music at `rate`
    pub fn start_music(&mut self, rate: f32) {
        self.stop_music();
        let vol = SoundEffect::BackgroundMusic.base_volume() * self.music_volume;
        let Some(path) = self.assets.sound(SoundEffect::BackgroundMusic) else {
            return;
        };
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match backend.start_loop(SoundEffect::BackgroundMusic, path, vol, rate) {
            Ok(()) => self.music_playing = true,
            Err(e) => log::warn!("Music failed to start: {}", e),
        }
    }

    /// Change the music rate, restarting the track if the backend can't
    /// adjust it in place
    pub fn set_music_rate(&mut self, rate: f32) {
        if !self.music_playing {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.set_loop_rate(rate) {
            log::debug!("Rate change failed ({}), restarting music", e);
            self.start_music(rate);
        }
    }

    pub fn stop_music(&mut self) {
        if !self.music_playing {
            return;
        }
        self.music_playing = false;
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.stop_loop() {
                log::warn!("Music failed to stop: {}", e);
            }
        }
    }
}
