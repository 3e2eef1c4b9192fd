// Labeled evaluation sentences and the pre-evaluation filter.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::store::AspectStore;
use crate::error::{RankError, Result};

/// A sentence mentioning an entity, with the aspect it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSentence {
    pub sentence: String,
    pub entity: String,
    /// Ground-truth aspect label
    pub aspect: String,
}

/// Load a JSON array of sentence records. Extra fields are ignored.
pub fn load_sentences(path: &Path) -> Result<Vec<LabeledSentence>> {
    let raw = fs::read_to_string(path).map_err(|e| RankError::load("sentences", path, e))?;
    let sentences: Vec<LabeledSentence> =
        serde_json::from_str(&raw).map_err(|e| RankError::load("sentences", path, e))?;
    debug!(rows = sentences.len(), "Parsed sentence records");
    Ok(sentences)
}

/// Drop rows that cannot be evaluated.
///
/// A row is kept when its sentence has text and its entity exists in the
/// store with at least one section (a lead-only entity still counts: its
/// prediction is the summary fallback). Order of the kept rows is preserved.
pub fn filter_samples(store: &AspectStore, sentences: Vec<LabeledSentence>) -> Vec<LabeledSentence> {
    let before = sentences.len();
    let kept: Vec<LabeledSentence> = sentences
        .into_iter()
        .filter(|row| !row.sentence.trim().is_empty())
        .filter(|row| store.get(&row.entity).is_some_and(|e| e.has_any_section()))
        .collect();

    info!(
        before = before,
        after = kept.len(),
        dropped = before - kept.len(),
        "Filtered sentence samples"
    );
    kept
}
