//! Difficulty curve
//!
//! Pure functions of the level. Evaluated at session start (level 1) and
//! again each time the score crosses a level-up threshold.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Fall speed for notes spawned at `level` (units per frame)
pub fn note_speed(level: u32) -> f32 {
    NOTE_SPEED_START + steps(level) * NOTE_SPEED_INCREMENT
}

/// Seconds between spawns at `level`, floored at `SPAWN_INTERVAL_MIN`
pub fn spawn_interval(level: u32) -> f32 {
    (SPAWN_INTERVAL_START - steps(level) * SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_MIN)
}

/// Background music playback rate at `level`, capped at `MUSIC_RATE_MAX`
pub fn music_rate(level: u32) -> f32 {
    (MUSIC_RATE_BASE + steps(level) * MUSIC_RATE_INCREMENT).min(MUSIC_RATE_MAX)
}

/// Whether reaching `score` triggers a level-up
pub fn is_level_up(score: u32) -> bool {
    score > 0 && score % LEVEL_UP_EVERY == 0
}

/// Levels above the first; level 0 is treated as level 1
#[inline]
fn steps(level: u32) -> f32 {
    level.saturating_sub(1) as f32
}

/// Snapshot of every difficulty parameter for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub note_speed: f32,
    pub spawn_interval: f32,
    pub music_rate: f32,
}

impl Difficulty {
    pub fn for_level(level: u32) -> Self {
        Self {
            note_speed: note_speed(level),
            spawn_interval: spawn_interval(level),
            music_rate: music_rate(level),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::for_level(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one_uses_start_values() {
        let d = Difficulty::for_level(1);
        assert_eq!(d.note_speed, NOTE_SPEED_START);
        assert_eq!(d.spawn_interval, SPAWN_INTERVAL_START);
        assert_eq!(d.music_rate, MUSIC_RATE_BASE);
    }

    #[test]
    fn test_level_two_steps_once() {
        let d = Difficulty::for_level(2);
        assert!((d.note_speed - 2.4).abs() < 1e-5);
        assert!((d.spawn_interval - 0.75).abs() < 1e-5);
        assert!((d.music_rate - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_interval_hits_floor() {
        // 0.8 - 11 * 0.05 = 0.25, everything past that is clamped
        assert!((spawn_interval(12) - SPAWN_INTERVAL_MIN).abs() < 1e-5);
        assert_eq!(spawn_interval(40), SPAWN_INTERVAL_MIN);
    }

    #[test]
    fn test_music_rate_hits_cap() {
        assert!((music_rate(11) - MUSIC_RATE_MAX).abs() < 1e-5);
        assert_eq!(music_rate(50), MUSIC_RATE_MAX);
    }

    #[test]
    fn test_level_up_threshold() {
        assert!(!is_level_up(0));
        assert!(!is_level_up(9));
        assert!(is_level_up(10));
        assert!(!is_level_up(11));
        assert!(is_level_up(30));
    }

    #[test]
    fn test_level_zero_behaves_like_level_one() {
        assert_eq!(Difficulty::for_level(0), Difficulty::for_level(1));
    }

    proptest! {
        #[test]
        fn note_speed_strictly_increases(level in 1u32..10_000) {
            prop_assert!(note_speed(level + 1) > note_speed(level));
        }

        #[test]
        fn spawn_interval_non_increasing_and_floored(level in 1u32..10_000) {
            prop_assert!(spawn_interval(level + 1) <= spawn_interval(level));
            prop_assert!(spawn_interval(level) >= SPAWN_INTERVAL_MIN);
        }

        #[test]
        fn music_rate_non_decreasing_and_capped(level in 1u32..10_000) {
            prop_assert!(music_rate(level + 1) >= music_rate(level));
            prop_assert!(music_rate(level) <= MUSIC_RATE_MAX);
        }
    }
}
