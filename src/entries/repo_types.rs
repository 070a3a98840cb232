use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::db::StoreError;
use crate::scoring::FoodAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(format!("unknown meal type {other:?}")),
        }
    }
}

/// Raw `food_entries` row.
#[derive(Debug, FromRow)]
pub struct FoodEntryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: Date,
    pub meal_time: Option<String>,
    pub meal_type: String,
    pub food_text: String,
    pub llm_analysis: Json<FoodAnalysis>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// One logged meal with its embedded analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub time: Option<String>,
    pub meal_type: MealType,
    pub food_text: String,
    pub analysis: FoodAnalysis,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<FoodEntryRow> for FoodEntry {
    type Error = StoreError;

    fn try_from(r: FoodEntryRow) -> Result<Self, Self::Error> {
        let meal_type = r
            .meal_type
            .parse()
            .map_err(|e: String| StoreError::Corrupt(format!("food entry {}: {e}", r.id)))?;
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            date: r.entry_date,
            time: r.meal_time,
            meal_type,
            food_text: r.food_text,
            analysis: r.llm_analysis.0,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Fields needed to insert an entry; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewFoodEntry {
    pub user_id: Uuid,
    pub date: Date,
    pub time: Option<String>,
    pub meal_type: MealType,
    pub food_text: String,
    pub analysis: FoodAnalysis,
}
