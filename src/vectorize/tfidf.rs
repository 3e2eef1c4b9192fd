// Pre-fitted TF-IDF model.
//
// The model is an artifact produced elsewhere: a vocabulary (term -> column),
// one IDF weight per column, and the transform settings it was fitted with.
// Transform follows the common fitted-vectorizer recipe:
//
//   1. lowercase, split into word tokens of 2+ word characters
//   2. expand into word n-grams over the configured range
//   3. tf = raw count (or 1 + ln(count) when sublinear_tf is set)
//   4. weight = tf * idf[column]; out-of-vocabulary terms are ignored
//   5. normalize each row (L2 by default)

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sparse::SparseVector;
use super::traits::TextVectorizer;
use crate::error::{RankError, Result};

/// Row normalization applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// A fitted TF-IDF model. Fields are private: `new`, `load` and
/// `with_ngram_range` validate, so transform never indexes out of range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfModel {
    /// Term (or space-joined n-gram) to column index
    vocabulary: HashMap<String, usize>,
    /// IDF weight per column
    idf: Vec<f64>,
    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    norm: Norm,
}

impl TfidfModel {
    /// Build a unigram, L2-normalized model from a vocabulary and IDF weights.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self> {
        Self {
            vocabulary,
            idf,
            ngram_range: default_ngram_range(),
            sublinear_tf: false,
            norm: Norm::L2,
        }
        .checked()
    }

    /// Use word n-grams of length `lo..=hi`.
    pub fn with_ngram_range(mut self, lo: usize, hi: usize) -> Result<Self> {
        self.ngram_range = (lo, hi);
        self.checked()
    }

    /// Use `1 + ln(count)` instead of the raw count as term frequency.
    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }

    pub fn sublinear_tf(&self) -> bool {
        self.sublinear_tf
    }

    pub fn norm(&self) -> Norm {
        self.norm
    }

    fn checked(self) -> Result<Self> {
        self.check()
            .map_err(|reason| RankError::Configuration(format!("invalid TF-IDF model: {reason}")))?;
        Ok(self)
    }

    /// Load a serialized model from disk and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| RankError::load("model", path, e))?;
        let model: TfidfModel =
            serde_json::from_str(&raw).map_err(|e| RankError::load("model", path, e))?;
        model
            .check()
            .map_err(|reason| RankError::load("model", path, reason))?;

        debug!(
            terms = model.vocabulary.len(),
            ngram_min = model.ngram_range.0,
            ngram_max = model.ngram_range.1,
            "Loaded TF-IDF model"
        );
        Ok(model)
    }

    /// Structural invariants every usable model must satisfy.
    fn check(&self) -> std::result::Result<(), String> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        let mut seen = HashSet::with_capacity(self.vocabulary.len());
        for (term, &col) in &self.vocabulary {
            if col >= self.idf.len() {
                return Err(format!("term '{term}' maps to column {col}, out of range"));
            }
            if !seen.insert(col) {
                return Err(format!("column {col} is assigned to more than one term"));
            }
        }
        if let Some(bad) = self.idf.iter().position(|w| !w.is_finite()) {
            return Err(format!("idf weight at column {bad} is not finite"));
        }
        let (lo, hi) = self.ngram_range;
        if lo == 0 || lo > hi {
            return Err(format!("invalid ngram_range ({lo}, {hi})"));
        }
        Ok(())
    }

    fn transform_one(&self, text: &str) -> SparseVector {
        let tokens = tokenize(text);
        let mut counts: HashMap<usize, u32> = HashMap::new();

        let (lo, hi) = self.ngram_range;
        for n in lo..=hi {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                let gram = window.join(" ");
                if let Some(&col) = self.vocabulary.get(&gram) {
                    *counts.entry(col).or_insert(0) += 1;
                }
            }
        }

        let pairs: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64
                };
                (col, tf * self.idf[col])
            })
            .collect();

        let mut row = SparseVector::from_pairs(pairs);
        match self.norm {
            Norm::L2 => {
                let n = row.l2_norm();
                row.scale_by(n);
            }
            Norm::L1 => {
                let n = row.l1_norm();
                row.scale_by(n);
            }
            Norm::None => {}
        }
        row
    }
}

impl TextVectorizer for TfidfModel {
    fn transform(&self, texts: &[String]) -> Vec<SparseVector> {
        texts.iter().map(|t| self.transform_one(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.idf.len()
    }
}

/// Lowercased word tokens of at least two word characters.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            push_token(&mut tokens, std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, current);
    }

    tokens
}

fn push_token(tokens: &mut Vec<String>, token: String) {
    if token.chars().count() >= 2 {
        tokens.push(token);
    }
}
