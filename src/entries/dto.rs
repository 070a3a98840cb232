use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::repo_types::{FoodEntry, MealType};
use crate::scoring::{FoodAnalysis, SummaryStatus};

#[derive(Debug, Deserialize)]
pub struct CreateFoodEntryRequest {
    pub date: Date,
    #[serde(default)]
    pub time: Option<String>,
    pub meal_type: MealType,
    pub food_text: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFoodEntryRequest {
    pub food_text: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryDateQuery {
    pub date: Date,
}

#[derive(Debug, Serialize)]
pub struct CreatedFoodEntryResponse {
    pub message: &'static str,
    pub entry_id: Uuid,
    pub updated_gut_score: i32,
    pub status: SummaryStatus,
}

#[derive(Debug, Serialize)]
pub struct MutatedFoodEntryResponse {
    pub message: &'static str,
    pub updated_gut_score: i32,
    pub status: SummaryStatus,
}

#[derive(Debug, Serialize)]
pub struct FoodEntryItem {
    pub id: Uuid,
    pub time: Option<String>,
    pub meal_type: MealType,
    pub food_text: String,
    pub analysis: FoodAnalysis,
}

impl From<FoodEntry> for FoodEntryItem {
    fn from(e: FoodEntry) -> Self {
        Self {
            id: e.id,
            time: e.time,
            meal_type: e.meal_type,
            food_text: e.food_text,
            analysis: e.analysis,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FoodEntriesResponse {
    pub date: Date,
    pub entries: Vec<FoodEntryItem>,
}
