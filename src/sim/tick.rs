//! Per-frame simulation tick
//!
//! Core game loop that advances a running session by one frame.

use super::difficulty::{Difficulty, is_level_up};
use super::state::{GameEvent, Session};
use crate::consts::*;

/// Input for a single tick. Key presses set the player's velocity directly,
/// so the only per-tick command is the demo autopilot.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Idle/demo mode - AI steers the runner
    pub autopilot: bool,
}

/// Advance the session by one frame of `dt` seconds.
///
/// Returns the events produced this frame in the order they happened.
/// A session that already hit the miss limit is left untouched.
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.is_over() {
        return events;
    }

    session.frame += 1;

    // Move the runner
    if input.autopilot {
        steer_toward_lowest_note(session);
    }
    session.player.integrate(SCREEN_WIDTH);

    // Spawn timer, remainder is discarded on reset
    session.spawn_timer += dt;
    if session.spawn_timer >= session.difficulty.spawn_interval {
        let note = session.spawn_note();
        log::debug!("Spawned note {} at x={:.1}", note.id, note.pos.x);
        events.push(GameEvent::NoteSpawned {
            id: note.id,
            x: note.pos.x,
        });
        session.spawn_timer = 0.0;
    }

    for note in &mut session.notes {
        note.advance();
    }

    // Catches are resolved before misses, so a note that satisfies both
    // predicates this frame counts as caught.
    let player_box = session.player.bounds();
    let mut i = 0;
    while i < session.notes.len() {
        if !session.notes[i].bounds().intersects(&player_box) {
            i += 1;
            continue;
        }
        let note = session.notes.swap_remove(i);
        session.score += 1;
        events.push(GameEvent::Caught {
            id: note.id,
            score: session.score,
        });
        if is_level_up(session.score) {
            level_up(session, &mut events);
        }
    }

    let mut i = 0;
    while i < session.notes.len() {
        if !session.notes[i].is_below_floor() {
            i += 1;
            continue;
        }
        let note = session.notes.swap_remove(i);
        // Misses stop counting at the limit; extra notes lost in the same
        // frame are discarded.
        if session.misses < MAX_MISSES {
            session.misses += 1;
            log::debug!("Missed note {} ({}/{})", note.id, session.misses, MAX_MISSES);
            events.push(GameEvent::Missed {
                id: note.id,
                misses: session.misses,
            });
        }
    }

    if session.is_over() {
        log::info!(
            "Run over: score {} at level {} after {} frames",
            session.score,
            session.level,
            session.frame
        );
        events.push(GameEvent::RunOver {
            score: session.score,
            level: session.level,
        });
    }

    events
}

fn level_up(session: &mut Session, events: &mut Vec<GameEvent>) {
    session.level += 1;
    session.difficulty = Difficulty::for_level(session.level);
    log::info!(
        "Level {}: note speed {:.2}, spawn interval {:.2}s, music rate {:.2}",
        session.level,
        session.difficulty.note_speed,
        session.difficulty.spawn_interval,
        session.difficulty.music_rate
    );
    events.push(GameEvent::LevelUp {
        level: session.level,
        difficulty: session.difficulty,
    });
}

/// Chase the note closest to the floor
fn steer_toward_lowest_note(session: &mut Session) {
    let target = session
        .notes
        .iter()
        .min_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|n| n.pos.x);

    session.player.vel_x = match target {
        Some(x) => (x - session.player.pos.x).clamp(-PLAYER_SPEED, PLAYER_SPEED),
        None => 0.0,
    };
}
