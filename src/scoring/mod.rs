//! Deterministic gut-health scoring: meal analyses in, bounded integer scores out.

mod analysis;
mod engine;
mod status;

pub use analysis::{DigestiveComplexity, FoodAnalysis, FoodCategory};
pub use engine::{GutScores, ScoringEngine};
pub use status::{StatusPolicy, SummaryStatus};
