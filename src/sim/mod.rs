//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform dependencies:
//! - One tick per frame
//! - Seeded RNG only
//! - Side effects reported as [`GameEvent`]s

pub mod collision;
pub mod difficulty;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use difficulty::{Difficulty, is_level_up, music_rate, note_speed, spawn_interval};
pub use state::{GameEvent, GamePhase, Note, Player, Session};
pub use tick::{TickInput, tick};
