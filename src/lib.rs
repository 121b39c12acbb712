//! NoteRunner - catch the falling notes
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, difficulty, update tick)
//! - `game`: Phase state machine tying the simulation to input, audio and saves
//! - `platform`: Presentation shell interface plus the native terminal/audio shell
//! - `persistence`: High score / last level save file
//! - `settings`: User preferences and paths

pub mod assets;
pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::Game;
pub use persistence::SaveRecord;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one update per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play area, y axis points up
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const SCREEN_TITLE: &str = "NoteRunner";
    /// Decorative floor line drawn under the runner
    pub const FLOOR_LINE_Y: f32 = 50.0;

    /// Player defaults (speed in units per frame)
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const PLAYER_BASELINE_Y: f32 = 125.0;
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;

    /// Note defaults
    pub const NOTE_WIDTH: f32 = 26.0;
    pub const NOTE_HEIGHT: f32 = 34.0;
    /// Horizontal spawn range is [margin, width - margin]
    pub const NOTE_SPAWN_MARGIN: f32 = 20.0;
    /// Notes spawn this far above the top edge
    pub const NOTE_SPAWN_OFFSET: f32 = 20.0;

    /// Difficulty curve
    pub const NOTE_SPEED_START: f32 = 2.0;
    pub const NOTE_SPEED_INCREMENT: f32 = 0.4;
    pub const SPAWN_INTERVAL_START: f32 = 0.8;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.25;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.05;
    pub const LEVEL_UP_EVERY: u32 = 10;

    /// Music playback rate curve
    pub const MUSIC_RATE_BASE: f32 = 1.0;
    pub const MUSIC_RATE_INCREMENT: f32 = 0.1;
    pub const MUSIC_RATE_MAX: f32 = 2.0;

    /// Run ends when this many notes reach the floor
    pub const MAX_MISSES: u32 = 5;

    /// Base playback volumes, scaled by settings
    pub const MUSIC_VOLUME: f32 = 0.4;
    pub const CATCH_VOLUME: f32 = 0.6;
    pub const MISS_VOLUME: f32 = 0.4;

    /// Drawing scale applied to sprite images
    pub const NOTE_SCALE: f32 = 0.1;
    pub const PLAYER_SCALE: f32 = 0.2;

    /// Default file locations
    pub const SAVE_FILE: &str = "save_data.json";
    pub const SETTINGS_FILE: &str = "note_runner_settings.json";
    pub const ASSETS_DIR: &str = "assets";
    pub const BACKGROUND_MUSIC_FILE: &str = "bg_music.mp3";
    pub const CATCH_SOUND_FILE: &str = "catch.wav";
    pub const MISS_SOUND_FILE: &str = "miss.wav";
    pub const NOTE_IMAGE_FILE: &str = "note.png";
    pub const PLAYER_IMAGE_FILE: &str = "runner.png";
}
