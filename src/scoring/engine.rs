use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::analysis::{FoodAnalysis, FoodCategory};
use crate::config::{ScoreWeights, ScoringConfig};

const MAX_SCORE: u32 = 100;

/// The day's aggregate. Every score is in `0..=100`; `fiber_grams` is the floored total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GutScores {
    pub fiber_grams: i32,
    pub fiber_score: i32,
    pub diversity_score: i32,
    pub processed_score: i32,
    pub probiotic_score: i32,
    pub digestive_score: i32,
    pub gut_score: i32,
}

/// Turns a day's meal analyses into [`GutScores`]. Pure: no I/O, no logging.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn compute_scores<'a, I>(&self, analyses: I) -> GutScores
    where
        I: IntoIterator<Item = &'a FoodAnalysis>,
    {
        let analyses: Vec<&FoodAnalysis> = analyses.into_iter().collect();
        // an empty day scores zero everywhere, including digestive
        if analyses.is_empty() {
            return GutScores::default();
        }
        let count = analyses.len() as u64;

        let total_fiber: f64 = analyses
            .iter()
            .map(|a| {
                if a.fiber_grams.is_finite() {
                    a.fiber_grams.max(0.0)
                } else {
                    0.0
                }
            })
            .sum();
        let fiber_score = percent((total_fiber / self.config.target_fiber_grams * 100.0).floor());

        let distinct: BTreeSet<FoodCategory> = analyses
            .iter()
            .flat_map(|a| a.food_categories.iter().copied())
            .filter(|c| *c != FoodCategory::Unknown)
            .collect();
        let diversity_score = scaled(distinct.len(), self.config.diversity_points_per_category);

        let processed = analyses.iter().filter(|a| a.is_processed).count() as u64;
        let processed_score = ((count - processed) * 100 / count) as u32;

        let probiotic = analyses.iter().filter(|a| a.has_probiotics).count();
        let probiotic_score = scaled(probiotic, self.config.probiotic_points_per_serving);

        let complexity_total: u64 = analyses
            .iter()
            .map(|a| u64::from(a.digestive_complexity.weight()))
            .sum();
        let digestive_score = (complexity_total / count) as u32;

        let gut_score = self.gut_score(
            fiber_score,
            diversity_score,
            processed_score,
            probiotic_score,
            digestive_score,
        );

        GutScores {
            fiber_grams: total_fiber.floor() as i32,
            fiber_score: fiber_score as i32,
            diversity_score: diversity_score as i32,
            processed_score: processed_score as i32,
            probiotic_score: probiotic_score as i32,
            digestive_score: digestive_score as i32,
            gut_score: gut_score as i32,
        }
    }

    /// Weighted composite of the five sub-scores, floored and clamped to `0..=100`.
    pub fn gut_score(
        &self,
        fiber: u32,
        diversity: u32,
        processed: u32,
        probiotic: u32,
        digestive: u32,
    ) -> u32 {
        let ScoreWeights {
            fiber: wf,
            diversity: wd,
            processed: wp,
            probiotic: wb,
            digestive: wg,
        } = self.config.weights;
        let weighted = u64::from(fiber) * u64::from(wf)
            + u64::from(diversity) * u64::from(wd)
            + u64::from(processed) * u64::from(wp)
            + u64::from(probiotic) * u64::from(wb)
            + u64::from(digestive) * u64::from(wg);
        (weighted / u64::from(ScoreWeights::BASIS)).min(u64::from(MAX_SCORE)) as u32
    }
}

fn percent(value: f64) -> u32 {
    value.clamp(0.0, f64::from(MAX_SCORE)) as u32
}

fn scaled(count: usize, points: u32) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count.saturating_mul(points).min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::analysis::DigestiveComplexity;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringConfig::default())
    }

    fn meal(
        fiber: f64,
        categories: &[FoodCategory],
        processed: bool,
        probiotic: bool,
        complexity: DigestiveComplexity,
    ) -> FoodAnalysis {
        FoodAnalysis {
            foods: vec!["meal".into()],
            fiber_grams: fiber,
            food_categories: categories.iter().copied().collect(),
            is_processed: processed,
            has_probiotics: probiotic,
            digestive_complexity: complexity,
        }
    }

    #[test]
    fn empty_day_is_all_zero() {
        let none: Vec<FoodAnalysis> = Vec::new();
        let scores = engine().compute_scores(&none);
        assert_eq!(scores, GutScores::default());
        assert_eq!(scores.digestive_score, 0);
    }

    #[test]
    fn two_meal_day_matches_worked_example() {
        let analyses = [
            meal(12.0, &[FoodCategory::Vegetable], false, false, DigestiveComplexity::Easy),
            meal(
                20.0,
                &[FoodCategory::Legume, FoodCategory::WholeGrain],
                false,
                true,
                DigestiveComplexity::Moderate,
            ),
        ];
        let scores = engine().compute_scores(&analyses);
        assert_eq!(
            scores,
            GutScores {
                fiber_grams: 32,
                fiber_score: 100,
                diversity_score: 45,
                processed_score: 100,
                probiotic_score: 40,
                digestive_score: 85,
                gut_score: 75,
            }
        );
    }

    #[test]
    fn fiber_saturates_at_target_however_it_is_split() {
        let e = engine();
        for split in [[30.0, 0.0, 0.0], [10.0, 10.0, 10.0], [0.5, 29.5, 0.0], [25.0, 25.0, 1.0]] {
            let analyses: Vec<_> = split
                .iter()
                .map(|g| meal(*g, &[], false, false, DigestiveComplexity::Moderate))
                .collect();
            assert_eq!(e.compute_scores(&analyses).fiber_score, 100, "split {split:?}");
        }
    }

    #[test]
    fn fiber_score_truncates() {
        let analyses = [meal(9.0, &[], false, false, DigestiveComplexity::Moderate)];
        assert_eq!(engine().compute_scores(&analyses).fiber_score, 30);
        let analyses = [meal(9.99, &[], false, false, DigestiveComplexity::Moderate)];
        let scores = engine().compute_scores(&analyses);
        assert_eq!(scores.fiber_score, 33);
        assert_eq!(scores.fiber_grams, 9);
        // divide first, then scale: 5.1 * 100 / 30 lands just under 17
        let analyses = [meal(5.1, &[], false, false, DigestiveComplexity::Moderate)];
        assert_eq!(engine().compute_scores(&analyses).fiber_score, 17);
        let analyses = [meal(10.2, &[], false, false, DigestiveComplexity::Moderate)];
        assert_eq!(engine().compute_scores(&analyses).fiber_score, 34);
    }

    #[test]
    fn diversity_counts_distinct_categories_and_ignores_unknown() {
        let e = engine();
        let only_unknown = [meal(0.0, &[FoodCategory::Unknown], false, false, DigestiveComplexity::Moderate)];
        assert_eq!(e.compute_scores(&only_unknown).diversity_score, 0);

        let repeated = [
            meal(0.0, &[FoodCategory::Fruit, FoodCategory::Unknown], false, false, DigestiveComplexity::Moderate),
            meal(0.0, &[FoodCategory::Fruit], false, false, DigestiveComplexity::Moderate),
        ];
        assert_eq!(e.compute_scores(&repeated).diversity_score, 15);

        let seven = [meal(
            0.0,
            &[
                FoodCategory::WholeGrain,
                FoodCategory::Vegetable,
                FoodCategory::Fruit,
                FoodCategory::Legume,
                FoodCategory::NutsSeeds,
                FoodCategory::Fermented,
                FoodCategory::Dairy,
            ],
            false,
            false,
            DigestiveComplexity::Moderate,
        )];
        assert_eq!(e.compute_scores(&seven).diversity_score, 100);
    }

    #[test]
    fn processed_score_never_rises_as_processed_share_grows() {
        let e = engine();
        let mut previous = u32::MAX;
        for processed in 0..=5 {
            let analyses: Vec<_> = (0..5)
                .map(|i| meal(0.0, &[], i < processed, false, DigestiveComplexity::Moderate))
                .collect();
            let score = e.compute_scores(&analyses).processed_score as u32;
            assert!(score <= previous, "{processed} processed meals scored {score}");
            previous = score;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn processed_score_floors_thirds() {
        let analyses = [
            meal(0.0, &[], true, false, DigestiveComplexity::Moderate),
            meal(0.0, &[], false, false, DigestiveComplexity::Moderate),
            meal(0.0, &[], false, false, DigestiveComplexity::Moderate),
        ];
        assert_eq!(engine().compute_scores(&analyses).processed_score, 66);
    }

    #[test]
    fn probiotic_caps_at_one_hundred() {
        let analyses: Vec<_> = (0..4)
            .map(|_| meal(0.0, &[], false, true, DigestiveComplexity::Moderate))
            .collect();
        assert_eq!(engine().compute_scores(&analyses).probiotic_score, 100);
    }

    #[test]
    fn digestive_is_floored_mean_of_complexity_weights() {
        let analyses = [
            meal(0.0, &[], false, false, DigestiveComplexity::Easy),
            meal(0.0, &[], false, false, DigestiveComplexity::Heavy),
            meal(0.0, &[], false, false, DigestiveComplexity::Unrecognized),
        ];
        // (100 + 40 + 70) / 3 = 70
        assert_eq!(engine().compute_scores(&analyses).digestive_score, 70);
    }

    #[test]
    fn scores_stay_in_bounds_for_extreme_input() {
        let analyses: Vec<_> = (0..50)
            .map(|i| {
                meal(
                    if i % 2 == 0 { 1e9 } else { f64::NAN },
                    &[FoodCategory::Dairy, FoodCategory::Processed],
                    i % 3 == 0,
                    true,
                    DigestiveComplexity::Heavy,
                )
            })
            .collect();
        let s = engine().compute_scores(&analyses);
        for v in [
            s.fiber_score,
            s.diversity_score,
            s.processed_score,
            s.probiotic_score,
            s.digestive_score,
            s.gut_score,
        ] {
            assert!((0..=100).contains(&v));
        }
        assert!(s.fiber_grams >= 0);
    }

    #[test]
    fn gut_score_depends_only_on_sub_scores() {
        let e = engine();
        let a = [meal(15.0, &[FoodCategory::Fruit], false, false, DigestiveComplexity::Easy)];
        let b = [
            meal(7.5, &[FoodCategory::Fruit], false, false, DigestiveComplexity::Easy),
            meal(7.5, &[FoodCategory::Unknown], false, false, DigestiveComplexity::Easy),
        ];
        let (sa, sb) = (e.compute_scores(&a), e.compute_scores(&b));
        assert_eq!(sa.fiber_score, sb.fiber_score);
        assert_eq!(sa.gut_score, sb.gut_score);
        assert_eq!(e.gut_score(100, 45, 100, 40, 85), 75);
    }

    #[test]
    fn custom_weights_change_the_composite() {
        let mut config = ScoringConfig::default();
        config.weights = ScoreWeights::from_fractions(1.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let e = ScoringEngine::new(config);
        assert_eq!(e.gut_score(63, 0, 0, 0, 0), 63);
    }
}
