// Text vectorization — preprocessing, the TF-IDF model, and sparse cosine.

pub mod preprocess;
pub mod sparse;
pub mod tfidf;
pub mod traits;
