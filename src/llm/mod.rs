//! Language-model collaborators: meal text parsing and daily coaching tips.
//!
//! Both recover locally. A failed or unconfigured model call degrades to a
//! deterministic fallback and is never surfaced to callers as an error.

mod client;
mod parser;
mod tips;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::scoring::{FoodAnalysis, GutScores};

pub use client::ChatClient;
pub use parser::LlmFoodParser;
pub use tips::{fallback_tips, LlmTipGenerator};

/// Exactly three short coaching tips.
pub type Tips = [String; 3];

#[async_trait]
pub trait FoodParser: Send + Sync {
    /// Always yields a complete analysis; falls back on any failure.
    async fn parse(&self, food_text: &str) -> FoodAnalysis;
}

#[async_trait]
pub trait TipGenerator: Send + Sync {
    async fn generate(&self, scores: TipScores) -> Tips;
}

/// The five sub-scores tips are generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipScores {
    pub fiber: i32,
    pub diversity: i32,
    pub processed: i32,
    pub probiotic: i32,
    pub digestive: i32,
}

/// Score areas in tie-break priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreArea {
    Fiber,
    Diversity,
    Processed,
    Probiotic,
    Digestive,
}

impl TipScores {
    pub fn by_area(&self) -> [(ScoreArea, i32); 5] {
        [
            (ScoreArea::Fiber, self.fiber),
            (ScoreArea::Diversity, self.diversity),
            (ScoreArea::Processed, self.processed),
            (ScoreArea::Probiotic, self.probiotic),
            (ScoreArea::Digestive, self.digestive),
        ]
    }

    /// Lowest-scoring area; ties go to the earliest area in priority order.
    pub fn lowest(&self) -> ScoreArea {
        let areas = self.by_area();
        let mut lowest = areas[0];
        for candidate in &areas[1..] {
            if candidate.1 < lowest.1 {
                lowest = *candidate;
            }
        }
        lowest.0
    }
}

impl From<&GutScores> for TipScores {
    fn from(s: &GutScores) -> Self {
        Self {
            fiber: s.fiber_score,
            diversity: s.diversity_score,
            processed: s.processed_score,
            probiotic: s.probiotic_score,
            digestive: s.digestive_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(f: i32, d: i32, p: i32, b: i32, g: i32) -> TipScores {
        TipScores {
            fiber: f,
            diversity: d,
            processed: p,
            probiotic: b,
            digestive: g,
        }
    }

    #[test]
    fn lowest_picks_the_minimum() {
        assert_eq!(scores(90, 80, 70, 10, 60).lowest(), ScoreArea::Probiotic);
        assert_eq!(scores(90, 80, 70, 60, 5).lowest(), ScoreArea::Digestive);
    }

    #[test]
    fn ties_break_in_priority_order() {
        assert_eq!(scores(0, 0, 0, 0, 0).lowest(), ScoreArea::Fiber);
        assert_eq!(scores(50, 20, 20, 20, 90).lowest(), ScoreArea::Diversity);
        assert_eq!(scores(50, 60, 30, 30, 30).lowest(), ScoreArea::Processed);
    }
}
