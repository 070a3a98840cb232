use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Category tags the food parser may assign. Anything outside the vocabulary reads as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    WholeGrain,
    Vegetable,
    Fruit,
    Legume,
    NutsSeeds,
    Fermented,
    Dairy,
    Protein,
    Processed,
    RefinedGrain,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestiveComplexity {
    Easy,
    #[default]
    Moderate,
    Heavy,
    #[serde(other)]
    Unrecognized,
}

impl DigestiveComplexity {
    pub fn weight(self) -> u32 {
        match self {
            DigestiveComplexity::Easy => 100,
            DigestiveComplexity::Heavy => 40,
            DigestiveComplexity::Moderate | DigestiveComplexity::Unrecognized => 70,
        }
    }
}

/// Structured signals extracted from one meal's free text.
///
/// Every field has a defined default so a degraded parser response still yields a
/// complete record: no fiber, `{unknown}` categories, not processed, no probiotics,
/// moderate complexity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodAnalysis {
    #[serde(deserialize_with = "null_as_default")]
    pub foods: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub fiber_grams: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub food_categories: BTreeSet<FoodCategory>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_processed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_probiotics: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub digestive_complexity: DigestiveComplexity,
}

/// An explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for FoodAnalysis {
    fn default() -> Self {
        Self {
            foods: Vec::new(),
            fiber_grams: 0.0,
            food_categories: BTreeSet::from([FoodCategory::Unknown]),
            is_processed: false,
            has_probiotics: false,
            digestive_complexity: DigestiveComplexity::Moderate,
        }
    }
}

impl FoodAnalysis {
    /// Record used when the parser cannot produce a confident result.
    pub fn fallback(food_text: &str) -> Self {
        Self {
            foods: vec![food_text.trim().to_string()],
            ..Self::default()
        }
    }

    /// Coerces out-of-contract values back into range.
    pub fn normalized(mut self, food_text: &str) -> Self {
        if !self.fiber_grams.is_finite() || self.fiber_grams < 0.0 {
            self.fiber_grams = 0.0;
        }
        if self.food_categories.is_empty() {
            self.food_categories.insert(FoodCategory::Unknown);
        }
        self.foods.retain(|f| !f.trim().is_empty());
        if self.foods.is_empty() {
            self.foods.push(food_text.trim().to_string());
        }
        self
    }
}
