//! Game settings and preferences
//!
//! Read from a JSON file next to the save file. Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{ASSETS_DIR, SAVE_FILE};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Files ===
    /// Directory holding music, sounds and sprite images
    pub assets_dir: PathBuf,
    /// High score / last level file
    pub save_file: PathBuf,

    // === Gameplay ===
    /// Fixed RNG seed for note placement (random per run when unset)
    pub seed: Option<u64>,
    /// Start with the demo autopilot steering the runner
    pub demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            assets_dir: PathBuf::from(ASSETS_DIR),
            save_file: PathBuf::from(SAVE_FILE),

            seed: None,
            demo: false,
        }
    }
}

impl Settings {
    /// Effective sound effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music volume
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("Using default settings");
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from '{}'", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings '{}': {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not write settings '{}': {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_effective_volume_is_clamped() {
        let settings = Settings {
            master_volume: 3.0,
            sfx_volume: 2.0,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 1.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = std::env::temp_dir().join(format!("note_runner_settings_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        fs::write(&path, r#"{"muted": true, "seed": 9}"#).unwrap();

        let settings = Settings::load(&path);
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.save_file, PathBuf::from(SAVE_FILE));

        settings.save(&path);
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }
}
