//! Session state and entity types
//!
//! Everything a single run mutates lives in [`Session`]. It is recreated
//! whenever a new run starts.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::difficulty::Difficulty;
use crate::consts::*;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a click
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended, showing results
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "Menu",
            GamePhase::Playing => "Playing",
            GamePhase::GameOver => "GameOver",
        }
    }
}

/// Side effects produced by a tick, consumed by the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    NoteSpawned { id: u32, x: f32 },
    /// A note hit the player. `score` is the total after the catch.
    Caught { id: u32, score: u32 },
    /// A note fell past the floor. `misses` is the total after the miss.
    Missed { id: u32, misses: u32 },
    LevelUp { level: u32, difficulty: Difficulty },
    /// Miss limit reached
    RunOver { score: u32, level: u32 },
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    /// Horizontal velocity in units per frame
    pub vel_x: f32,
    pub size: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, PLAYER_BASELINE_Y),
            vel_x: 0.0,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Apply velocity, then keep the whole box inside `[0, width]`
    pub fn integrate(&mut self, width: f32) {
        self.pos.x += self.vel_x;
        let half = self.size.x / 2.0;
        if self.pos.x - half < 0.0 {
            self.pos.x = half;
        }
        if self.pos.x + half > width {
            self.pos.x = width - half;
        }
    }
}

/// A falling note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    /// Fall speed in units per frame, fixed at spawn
    pub speed: f32,
    pub size: Vec2,
}

impl Note {
    pub fn new(id: u32, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            pos,
            speed,
            size: Vec2::new(NOTE_WIDTH, NOTE_HEIGHT),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.y -= self.speed;
    }

    /// Entire note is below the floor of the play area
    pub fn is_below_floor(&self) -> bool {
        self.bounds().top() < 0.0
    }
}

/// One run's worth of state
#[derive(Debug, Clone)]
pub struct Session {
    pub score: u32,
    pub level: u32,
    pub misses: u32,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    pub difficulty: Difficulty,
    pub player: Player,
    /// Active notes, no ordering guarantee
    pub notes: Vec<Note>,
    /// Ticks since the run started
    pub frame: u64,
    pub seed: u64,
    rng: Pcg32,
    next_id: u32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            score: 0,
            level: 1,
            misses: 0,
            spawn_timer: 0.0,
            difficulty: Difficulty::for_level(1),
            player: Player::default(),
            notes: Vec::new(),
            frame: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop a note at a random x along the top edge, at the current speed
    pub fn spawn_note(&mut self) -> &Note {
        let x = self
            .rng
            .random_range(NOTE_SPAWN_MARGIN..=SCREEN_WIDTH - NOTE_SPAWN_MARGIN);
        self.push_note(Vec2::new(x, SCREEN_HEIGHT + NOTE_SPAWN_OFFSET))
    }

    /// Add a note at an explicit position, at the current speed
    pub fn push_note(&mut self, pos: Vec2) -> &Note {
        let id = self.next_entity_id();
        let note = Note::new(id, pos, self.difficulty.note_speed);
        self.notes.push(note);
        &self.notes[self.notes.len() - 1]
    }

    pub fn is_over(&self) -> bool {
        self.misses >= MAX_MISSES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(7);
        assert_eq!(session.score, 0);
        assert_eq!(session.level, 1);
        assert_eq!(session.misses, 0);
        assert!(session.notes.is_empty());
        assert_eq!(session.player.pos, Vec2::new(SCREEN_WIDTH / 2.0, PLAYER_BASELINE_Y));
        assert_eq!(session.difficulty, Difficulty::for_level(1));
    }

    #[test]
    fn test_player_clamped_to_left_edge() {
        let mut player = Player {
            pos: Vec2::new(33.0, PLAYER_BASELINE_Y),
            vel_x: -PLAYER_SPEED,
            ..Default::default()
        };
        player.integrate(SCREEN_WIDTH);
        assert_eq!(player.bounds().left(), 0.0);
    }

    #[test]
    fn test_player_clamped_to_right_edge() {
        let mut player = Player {
            pos: Vec2::new(SCREEN_WIDTH - 33.0, PLAYER_BASELINE_Y),
            vel_x: PLAYER_SPEED,
            ..Default::default()
        };
        player.integrate(SCREEN_WIDTH);
        assert_eq!(player.bounds().right(), SCREEN_WIDTH);
    }

    #[test]
    fn test_spawned_notes_stay_in_bounds() {
        let mut session = Session::new(42);
        for _ in 0..200 {
            session.spawn_note();
        }
        for note in &session.notes {
            assert!(note.pos.x >= NOTE_SPAWN_MARGIN);
            assert!(note.pos.x <= SCREEN_WIDTH - NOTE_SPAWN_MARGIN);
            assert_eq!(note.pos.y, SCREEN_HEIGHT + NOTE_SPAWN_OFFSET);
            assert_eq!(note.speed, NOTE_SPEED_START);
        }
    }

    #[test]
    fn test_spawn_is_seeded() {
        let mut a = Session::new(99);
        let mut b = Session::new(99);
        for _ in 0..10 {
            let xa = a.spawn_note().pos.x;
            let xb = b.spawn_note().pos.x;
            assert_eq!(xa, xb);
        }
    }

    #[test]
    fn test_note_below_floor() {
        // Top edge sits 1 unit above the floor
        let mut note = Note::new(1, Vec2::new(100.0, 1.0 - NOTE_HEIGHT / 2.0), 2.0);
        assert!(!note.is_below_floor());
        note.advance();
        assert!(note.is_below_floor());
    }
}
