// Evaluation pipeline: rank every labeled sentence and collect the
// per-row correctness indicators in sentence order.
//
// Rows are independent, but the convergence check downstream is order
// sensitive, so the loop stays sequential and pushes indicators in the
// order the sentences were given.

use std::collections::BTreeMap;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::aspects::sentences::LabeledSentence;
use crate::ranking::ranker::AspectRanker;

/// Hits and totals for one ground-truth aspect label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AspectTally {
    pub hits: usize,
    pub total: usize,
}

impl AspectTally {
    pub fn precision(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.hits as f64 / self.total as f64
        }
    }
}

/// Everything collected from one pass over the evaluation set.
#[derive(Debug, Clone, Default)]
pub struct EvaluationRun {
    /// One entry per sentence, true when the top-1 prediction was correct
    pub indicators: Vec<bool>,
    /// Predictions that fell back to the summary label
    pub fallbacks: usize,
    /// Per ground-truth aspect breakdown
    pub per_aspect: BTreeMap<String, AspectTally>,
}

impl EvaluationRun {
    pub fn rows(&self) -> usize {
        self.indicators.len()
    }

    pub fn hits(&self) -> usize {
        self.indicators.iter().filter(|&&h| h).count()
    }
}

/// Rank every sentence in order and record whether each prediction matched.
pub fn run(ranker: &AspectRanker, sentences: &[LabeledSentence], show_progress: bool) -> EvaluationRun {
    info!(rows = sentences.len(), "Start ranking sentences");

    let pb = if show_progress {
        let pb = ProgressBar::new(sentences.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Ranking [{bar:30}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut result = EvaluationRun {
        indicators: Vec::with_capacity(sentences.len()),
        ..Default::default()
    };

    for row in sentences {
        let prediction = ranker.rank(&row.sentence, &row.entity);
        let hit = prediction.label() == row.aspect;
        debug!(
            entity = %row.entity,
            predicted = prediction.label(),
            expected = %row.aspect,
            hit,
            "Ranked sentence"
        );

        if prediction.is_fallback() {
            result.fallbacks += 1;
        }
        let tally = result.per_aspect.entry(row.aspect.clone()).or_default();
        tally.total += 1;
        if hit {
            tally.hits += 1;
        }
        result.indicators.push(hit);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        rows = result.rows(),
        hits = result.hits(),
        fallbacks = result.fallbacks,
        "Finished ranking sentences"
    );
    result
}
