// aspectrank: TF-IDF aspect ranking for entity sentences
//
// This is the library root. Each module corresponds to one stage of the
// evaluation: load reference data, vectorize, rank, measure precision.

pub mod aspects;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod ranking;
pub mod status;
pub mod vectorize;
