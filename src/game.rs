//! Game controller
//!
//! Owns the phase state machine and everything a running process keeps
//! between runs: the save record, audio and the current session. The shell
//! feeds it input events, calls [`Game::update`] once per frame and
//! [`Game::draw`] to render.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::assets::Assets;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::PLAYER_SPEED;
use crate::persistence::{self, SaveRecord};
use crate::platform::{InputEvent, Key, Presenter};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, Session, TickInput, tick};
use crate::ui;

pub struct Game {
    phase: GamePhase,
    session: Session,
    record: SaveRecord,
    save_path: PathBuf,
    assets: Assets,
    audio: AudioManager,
    input: TickInput,
    /// Fixed base seed; each run offsets it by the run count
    seed: Option<u64>,
    runs: u64,
}

impl Game {
    /// Load the save record and set up on the menu screen
    pub fn new(settings: &Settings, assets: Assets, audio: AudioManager) -> Self {
        let record = persistence::load(&settings.save_file);
        let mut game = Self::with_record(record, settings.save_file.clone(), assets, audio);
        game.seed = settings.seed;
        game.input.autopilot = settings.demo;
        game
    }

    pub fn with_record(
        record: SaveRecord,
        save_path: PathBuf,
        assets: Assets,
        audio: AudioManager,
    ) -> Self {
        Self {
            phase: GamePhase::Menu,
            session: Session::new(0),
            record,
            save_path,
            assets,
            audio,
            input: TickInput::default(),
            seed: None,
            runs: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access for scripted play (demos and tests)
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn record(&self) -> &SaveRecord {
        &self.record
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.input.autopilot = on;
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyPress(Key::Escape) => self.return_to_menu(),
            InputEvent::KeyPress(key) => {
                if self.phase == GamePhase::Playing {
                    if let Some(dir) = key.direction() {
                        self.session.player.vel_x = dir * PLAYER_SPEED;
                    }
                }
            }
            InputEvent::KeyRelease(key) => {
                if self.phase == GamePhase::Playing && key.direction().is_some() {
                    self.session.player.vel_x = 0.0;
                }
            }
            InputEvent::PointerPress { .. } => match self.phase {
                GamePhase::Menu | GamePhase::GameOver => self.start_run(),
                GamePhase::Playing => {}
            },
        }
    }

    /// Fresh session, runner and notes; music from the top
    pub fn start_run(&mut self) {
        let seed = self.next_seed();
        self.runs += 1;
        self.session = Session::new(seed);
        log::info!("Run {} seeded with {}", self.runs, self.session.seed);
        self.set_phase(GamePhase::Playing);
        self.audio.start_music(self.session.difficulty.music_rate);
    }

    /// Abandon whatever is on screen. An unfinished run is not saved.
    pub fn return_to_menu(&mut self) {
        self.audio.stop_music();
        self.set_phase(GamePhase::Menu);
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32) {
        match self.phase {
            GamePhase::Playing => {
                let events = tick(&mut self.session, &self.input, dt);
                for event in events {
                    self.apply(event);
                }
            }
            GamePhase::Menu | GamePhase::GameOver => {}
        }
    }

    pub fn draw(&self, p: &mut dyn Presenter) {
        match self.phase {
            GamePhase::Menu => ui::draw_menu(p, &self.record),
            GamePhase::Playing => ui::draw_playing(p, &self.session, &self.record, &self.assets),
            GamePhase::GameOver => ui::draw_game_over(p, &self.session),
        }
    }

    fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::NoteSpawned { .. } => {}
            GameEvent::Caught { .. } => self.audio.play(SoundEffect::Catch),
            GameEvent::Missed { .. } => self.audio.play(SoundEffect::Miss),
            GameEvent::LevelUp { difficulty, .. } => {
                self.audio.set_music_rate(difficulty.music_rate)
            }
            GameEvent::RunOver { score, level } => self.end_run(score, level),
        }
    }

    fn end_run(&mut self, score: u32, level: u32) {
        if self.record.merge_run(score, level) {
            log::info!("New record: {:?}", self.record);
        }
        persistence::save(&self.save_path, &self.record);
        self.audio.stop_music();
        self.set_phase(GamePhase::GameOver);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
        }
        self.phase = phase;
    }

    fn next_seed(&self) -> u64 {
        match self.seed {
            Some(base) => base.wrapping_add(self.runs),
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default(),
        }
    }
}
