// Aspect ranking — pick the section of an entity's reference document that
// a sentence is closest to.
//
// The sentence and every candidate aspect text are mapped into the model's
// TF-IDF space, and the candidate with the highest cosine similarity wins.
// Entities the store can't rank (unknown, or lead section only) fall back to
// the summary label instead of failing the run.

use std::fmt;

use tracing::{debug, error, info_span, Span};

use crate::aspects::store::AspectStore;
use crate::vectorize::preprocess::Preprocessor;
use crate::vectorize::sparse::{argmax, cosine_against, SparseVector};
use crate::vectorize::traits::TextVectorizer;

/// Label predicted when an entity has nothing to rank.
pub const SUMMARY_LABEL: &str = "summary";

/// Why a prediction fell back to the summary label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Entity is not in the aspect store
    UnknownEntity,
    /// Entity exists but has no aspects besides the lead section
    NoRankableAspects,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::UnknownEntity => f.write_str("entity not found in aspect store"),
            FallbackReason::NoRankableAspects => {
                f.write_str("entity page has no aspect other than the lead section")
            }
        }
    }
}

/// Outcome of ranking one sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Aspect { label: String, similarity: f64 },
    Fallback(FallbackReason),
}

impl Prediction {
    pub fn label(&self) -> &str {
        match self {
            Prediction::Aspect { label, .. } => label,
            Prediction::Fallback(_) => SUMMARY_LABEL,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Prediction::Fallback(_))
    }
}

/// Ranks an entity's aspects against a sentence.
///
/// Holds the loaded model and store read-only; every method is a pure
/// function of its arguments given that state.
pub struct AspectRanker {
    model: Box<dyn TextVectorizer>,
    preprocessor: Box<dyn Preprocessor>,
    store: AspectStore,
    span: Span,
}

impl AspectRanker {
    pub fn new(
        model: Box<dyn TextVectorizer>,
        preprocessor: Box<dyn Preprocessor>,
        store: AspectStore,
    ) -> Self {
        Self {
            model,
            preprocessor,
            store,
            span: info_span!("aspect_ranker"),
        }
    }

    /// Scope this ranker's log events under the given span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn store(&self) -> &AspectStore {
        &self.store
    }

    /// Preprocess then vectorize. Row `k` corresponds to `texts[k]`.
    pub fn vectorize(&self, texts: &[&str]) -> Vec<SparseVector> {
        let normalized = self.preprocessor.normalize_all(texts);
        self.model.transform(&normalized)
    }

    /// Similarity of the sentence to each candidate aspect, in candidate order.
    pub fn scores(
        &self,
        sentence: &str,
        entity: &str,
    ) -> Result<Vec<(String, f64)>, FallbackReason> {
        let aspects = self
            .store
            .aspects(entity)
            .ok_or(FallbackReason::UnknownEntity)?;
        if aspects.is_empty() {
            return Err(FallbackReason::NoRankableAspects);
        }

        let contents: Vec<&str> = aspects.iter().map(|a| a.content.as_str()).collect();
        let aspect_rows = self.vectorize(&contents);
        let sentence_row = self.vectorize(&[sentence]).pop().unwrap_or_default();

        debug!(entity, candidates = aspects.len(), "Calculating the most relevant aspect");
        let similarities = cosine_against(&sentence_row, &aspect_rows);

        Ok(aspects
            .iter()
            .map(|a| a.label.clone())
            .zip(similarities)
            .collect())
    }

    /// Rank a sentence against the entity's aspects.
    pub fn rank(&self, sentence: &str, entity: &str) -> Prediction {
        let _enter = self.span.enter();

        match self.scores(sentence, entity) {
            Ok(scored) => {
                let sims: Vec<f64> = scored.iter().map(|(_, s)| *s).collect();
                match argmax(&sims) {
                    Some(best) => {
                        let (label, similarity) = scored[best].clone();
                        Prediction::Aspect { label, similarity }
                    }
                    None => Prediction::Fallback(FallbackReason::NoRankableAspects),
                }
            }
            Err(reason) => {
                error!(entity, %reason, "No rankable aspect, predicting summary");
                Prediction::Fallback(reason)
            }
        }
    }

    /// Label of the closest aspect, or `"summary"` when nothing can be ranked.
    pub fn predict(&self, sentence: &str, entity: &str) -> String {
        self.rank(sentence, entity).label().to_string()
    }
}
