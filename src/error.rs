// Library error type.
//
// Lookup failures inside the ranker never show up here: an unknown entity or
// an entity without rankable aspects becomes a fallback prediction instead.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankError {
    /// Missing or invalid configuration, reported before any data is loaded.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An input artifact could not be read, parsed, or validated.
    #[error("failed to load {artifact} from {}: {reason}", path.display())]
    Load {
        artifact: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// Precision was requested over zero predictions.
    #[error("cannot compute precision over an empty prediction list")]
    EmptyInput,
}

impl RankError {
    pub fn load(artifact: &'static str, path: &Path, reason: impl ToString) -> Self {
        Self::Load {
            artifact,
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = RankError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_message_names_artifact_and_path() {
        let err = RankError::load("model", Path::new("model/tfidf_subj.json"), "missing idf");
        let msg = err.to_string();
        assert!(msg.contains("model"));
        assert!(msg.contains("tfidf_subj.json"));
        assert!(msg.contains("missing idf"));
    }
}
