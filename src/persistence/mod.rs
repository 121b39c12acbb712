//! Save file persistence
//!
//! A two-field JSON record holding the best score and the highest level
//! ever reached. Loading never fails: a missing or corrupt file yields the
//! default record. Saving is best-effort: failures are logged and the game
//! carries on with its in-memory record.

mod error;

pub use error::{SaveError, SaveResult};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveRecord {
    pub high_score: u32,
    pub last_level: u32,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            high_score: 0,
            last_level: 1,
        }
    }
}

impl SaveRecord {
    /// Fold a finished run into the record. Returns true if anything changed.
    pub fn merge_run(&mut self, score: u32, level: u32) -> bool {
        let before = *self;
        self.high_score = self.high_score.max(score);
        self.last_level = self.last_level.max(level);
        *self != before
    }

    fn normalized(mut self) -> Self {
        self.last_level = self.last_level.max(1);
        self
    }
}

/// Read the record, reporting why it could not be read
pub fn try_load(path: &Path) -> SaveResult<SaveRecord> {
    let json = fs::read_to_string(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let record: SaveRecord = serde_json::from_str(&json).map_err(|source| SaveError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(record.normalized())
}

/// Read the record, substituting defaults on any failure
pub fn load(path: &Path) -> SaveRecord {
    match try_load(path) {
        Ok(record) => {
            log::info!(
                "Loaded save: high score {}, last level {}",
                record.high_score,
                record.last_level
            );
            record
        }
        Err(e) if e.is_not_found() => {
            log::info!("No save file at '{}', starting fresh", path.display());
            SaveRecord::default()
        }
        Err(e) => {
            log::warn!("{}; using defaults", e);
            SaveRecord::default()
        }
    }
}

/// Write the record via a temp file and rename, overwriting the old one
pub fn try_save(path: &Path, record: &SaveRecord) -> SaveResult<()> {
    let io_err = |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };
    let json = serde_json::to_string_pretty(record).map_err(|source| SaveError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

/// Write the record, logging and swallowing any failure
pub fn save(path: &Path, record: &SaveRecord) {
    match try_save(path, record) {
        Ok(()) => log::info!(
            "Saved: high score {}, last level {}",
            record.high_score,
            record.last_level
        ),
        Err(e) => log::warn!("{}; progress kept in memory only", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fresh path under the system temp dir, unique per test
    fn temp_path(name: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "note_runner_persist_{}_{}_{}",
            std::process::id(),
            name,
            n
        ));
        fs::create_dir_all(&dir).unwrap();
        dir.join("save_data.json")
    }

    #[test]
    fn test_missing_file_yields_default() {
        let path = temp_path("missing");
        assert_eq!(load(&path), SaveRecord::default());
        assert!(try_load(&path).unwrap_err().is_not_found());
    }

    #[test]
    fn test_malformed_file_yields_default() {
        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(
            load(&path),
            SaveRecord {
                high_score: 0,
                last_level: 1
            }
        );
        assert!(matches!(try_load(&path), Err(SaveError::Parse { .. })));
    }

    #[test]
    fn test_wrong_types_yield_default() {
        let path = temp_path("types");
        fs::write(&path, r#"{"high_score": -4, "last_level": "ten"}"#).unwrap();
        assert_eq!(load(&path), SaveRecord::default());
    }

    #[test]
    fn test_missing_fields_default_individually() {
        let path = temp_path("partial");
        fs::write(&path, r#"{"high_score": 42}"#).unwrap();
        assert_eq!(
            load(&path),
            SaveRecord {
                high_score: 42,
                last_level: 1
            }
        );

        fs::write(&path, r#"{"last_level": 3, "theme": "dark"}"#).unwrap();
        assert_eq!(
            load(&path),
            SaveRecord {
                high_score: 0,
                last_level: 3
            }
        );
    }

    #[test]
    fn test_level_zero_normalized() {
        let path = temp_path("zero");
        fs::write(&path, r#"{"high_score": 5, "last_level": 0}"#).unwrap();
        assert_eq!(load(&path).last_level, 1);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let record = SaveRecord {
            high_score: 17,
            last_level: 2,
        };
        save(&path, &record);
        assert_eq!(load(&path), record);

        // Overwrites previous content
        let newer = SaveRecord {
            high_score: 30,
            last_level: 4,
        };
        save(&path, &newer);
        assert_eq!(load(&path), newer);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let path = temp_path("unwritable")
            .with_file_name("no_such_dir")
            .join("save_data.json");
        save(&path, &SaveRecord::default());
        assert!(matches!(
            try_save(&path, &SaveRecord::default()),
            Err(SaveError::Io { .. })
        ));
    }

    #[test]
    fn test_merge_run() {
        let mut record = SaveRecord {
            high_score: 5,
            last_level: 2,
        };
        assert!(!record.merge_run(3, 1));
        assert_eq!(
            record,
            SaveRecord {
                high_score: 5,
                last_level: 2
            }
        );
        assert!(record.merge_run(12, 2));
        assert_eq!(record.high_score, 12);
        assert!(record.merge_run(0, 3));
        assert_eq!(record.last_level, 3);
    }
}
