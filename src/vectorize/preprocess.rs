// Text normalization applied before vectorization.
//
// Both the sentence and the aspect texts go through the same pipeline so
// they land in the same token space as the texts the model was fitted on.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+").expect("URL pattern is valid"));

/// Normalizes raw text into the form the vectorizer expects.
pub trait Preprocessor: Send + Sync {
    fn normalize(&self, text: &str) -> String;

    /// Normalize a batch, keeping input order.
    fn normalize_all(&self, texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| self.normalize(t)).collect()
    }
}

/// Default cleanup: lowercase, drop URLs and non-letters, remove English
/// stop words and single-letter tokens.
pub struct NlpPipeline {
    stop_words: HashSet<String>,
}

impl NlpPipeline {
    pub fn new() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self {
            stop_words: stop_words.into_iter().collect(),
        }
    }
}

impl Default for NlpPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor for NlpPipeline {
    fn normalize(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        let without_urls = URL_PATTERN.replace_all(&lower, " ");
        let letters: String = without_urls
            .chars()
            .map(|c| if c.is_alphabetic() { c } else { ' ' })
            .collect();

        letters
            .split_whitespace()
            .filter(|w| w.chars().count() > 1 && !self.stop_words.contains(*w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Pass-through preprocessor for texts that are already normalized.
pub struct RawText;

impl Preprocessor for RawText {
    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }
}
