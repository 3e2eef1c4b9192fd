// Ranking — closest-aspect prediction and precision-at-1 evaluation.

pub mod precision;
pub mod ranker;
