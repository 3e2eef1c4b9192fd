// Pipeline orchestration — the batch evaluation run.

pub mod evaluation;
