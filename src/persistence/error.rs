//! Save file error types
//!
//! The best-effort wrappers in the parent module log these and carry on;
//! `try_load`/`try_save` hand them to the caller.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SaveError {
    /// Reading, writing or renaming the file failed
    Io { path: PathBuf, source: io::Error },
    /// The file exists but is not a valid save record
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The record could not be turned into JSON for writing
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl SaveError {
    /// The file simply isn't there yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, SaveError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io { path, source } => {
                write!(f, "save file I/O failed for '{}': {}", path.display(), source)
            }
            SaveError::Parse { path, source } => {
                write!(f, "save file '{}' is malformed: {}", path.display(), source)
            }
            SaveError::Encode { path, source } => {
                write!(f, "could not encode save for '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io { source, .. } => Some(source),
            SaveError::Parse { source, .. } | SaveError::Encode { source, .. } => Some(source),
        }
    }
}

pub type SaveResult<T> = Result<T, SaveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<u32>("x").unwrap_err()
    }

    #[test]
    fn test_encode_error_is_not_reported_as_malformed_file() {
        let err = SaveError::Encode {
            path: PathBuf::from("save_data.json"),
            source: json_error(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("could not encode save for 'save_data.json'"));
        assert!(!msg.contains("malformed"));
        assert!(err.source().is_some());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = SaveError::Parse {
            path: PathBuf::from("save_data.json"),
            source: json_error(),
        };
        assert!(err.to_string().contains("'save_data.json' is malformed"));
    }
}
