// Text vectorizer trait — the capability the ranker needs from a model.
//
// Any fitted vectorizer that maps texts into a fixed feature space can stand
// in here. The shipped implementation is the JSON-serialized TF-IDF model.

use super::sparse::SparseVector;

pub trait TextVectorizer: Send + Sync {
    /// Map each text to a row in the feature space. Row `k` belongs to
    /// `texts[k]`.
    fn transform(&self, texts: &[String]) -> Vec<SparseVector>;

    /// Number of columns in the feature space.
    fn dimensions(&self) -> usize;
}
