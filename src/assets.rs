//! Optional asset discovery
//!
//! Each asset may be absent. A missing file only disables the matching
//! feature: no music, a silent catch, a placeholder box instead of a sprite.

use std::path::{Path, PathBuf};

use crate::audio::SoundEffect;
use crate::consts::*;
use crate::platform::SpriteId;

/// Paths of the asset files that were found on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assets {
    pub background_music: Option<PathBuf>,
    pub catch_sound: Option<PathBuf>,
    pub miss_sound: Option<PathBuf>,
    pub note_image: Option<PathBuf>,
    pub player_image: Option<PathBuf>,
}

impl Assets {
    /// No assets at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Look for every known asset under `dir`
    pub fn discover(dir: &Path) -> Self {
        let assets = Self {
            background_music: existing(dir, BACKGROUND_MUSIC_FILE),
            catch_sound: existing(dir, CATCH_SOUND_FILE),
            miss_sound: existing(dir, MISS_SOUND_FILE),
            note_image: existing(dir, NOTE_IMAGE_FILE),
            player_image: existing(dir, PLAYER_IMAGE_FILE),
        };
        log::info!(
            "Assets in '{}': {}/5 found",
            dir.display(),
            assets.found_count()
        );
        assets
    }

    pub fn sound(&self, effect: SoundEffect) -> Option<&Path> {
        match effect {
            SoundEffect::BackgroundMusic => self.background_music.as_deref(),
            SoundEffect::Catch => self.catch_sound.as_deref(),
            SoundEffect::Miss => self.miss_sound.as_deref(),
        }
    }

    pub fn sprite(&self, sprite: SpriteId) -> Option<&Path> {
        match sprite {
            SpriteId::Note => self.note_image.as_deref(),
            SpriteId::Player => self.player_image.as_deref(),
        }
    }

    fn found_count(&self) -> usize {
        [
            &self.background_music,
            &self.catch_sound,
            &self.miss_sound,
            &self.note_image,
            &self.player_image,
        ]
        .iter()
        .filter(|p| p.is_some())
        .count()
    }
}

fn existing(dir: &Path, file: &str) -> Option<PathBuf> {
    let path = dir.join(file);
    if path.is_file() {
        Some(path)
    } else {
        log::debug!("Asset '{}' not found, feature disabled", path.display());
        None
    }
}
