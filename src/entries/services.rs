use lazy_static::lazy_static;
use regex::Regex;
use time::Date;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{CreateFoodEntryRequest, UpdateFoodEntryRequest};
use super::repo::EntryStore;
use super::repo_types::{FoodEntry, NewFoodEntry};
use crate::error::AppError;
use crate::llm::FoodParser;
use crate::state::AppState;
use crate::summaries::Recomputed;

pub const MAX_FOOD_TEXT_CHARS: usize = 1000;

lazy_static! {
    static ref MEAL_TIME_RE: Regex =
        Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9])?$").expect("meal time regex");
}

fn not_found() -> AppError {
    AppError::NotFound("Entry not found".into())
}

/// Trims the meal text and checks it is non-empty and at most `MAX_FOOD_TEXT_CHARS` characters.
pub fn clean_food_text(raw: &str) -> Result<String, AppError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("food_text must not be empty".into()));
    }
    if text.chars().count() > MAX_FOOD_TEXT_CHARS {
        return Err(AppError::BadRequest(format!(
            "food_text must be at most {MAX_FOOD_TEXT_CHARS} characters"
        )));
    }
    Ok(text.to_string())
}

/// `HH:MM` or `HH:MM:SS`; a blank value means no time.
pub fn clean_meal_time(raw: Option<String>) -> Result<Option<String>, AppError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(t) if MEAL_TIME_RE.is_match(t) => Ok(Some(t.to_string())),
        Some(t) => Err(AppError::BadRequest(format!(
            "time must be HH:MM or HH:MM:SS, got {t:?}"
        ))),
    }
}

pub async fn list_entries(
    state: &AppState,
    user_id: Uuid,
    date: Date,
) -> Result<Vec<FoodEntry>, AppError> {
    Ok(state.entries.list(user_id, date).await?)
}

/// Parses, stores and rescores. The parse happens before any summary work starts.
pub async fn create_entry(
    state: &AppState,
    user_id: Uuid,
    req: CreateFoodEntryRequest,
) -> Result<(FoodEntry, Recomputed), AppError> {
    let food_text = clean_food_text(&req.food_text)?;
    let time = clean_meal_time(req.time)?;

    let analysis = state.parser.parse(&food_text).await;
    let entry = state
        .entries
        .insert(NewFoodEntry {
            user_id,
            date: req.date,
            time,
            meal_type: req.meal_type,
            food_text,
            analysis,
        })
        .await?;

    let recomputed = state.aggregator.recompute(user_id, entry.date).await?;
    info!(
        entry_id = %entry.id,
        date = %entry.date,
        entries = recomputed.entry_count,
        "food entry added"
    );
    Ok((entry, recomputed))
}

pub async fn update_entry(
    state: &AppState,
    user_id: Uuid,
    entry_id: Uuid,
    req: UpdateFoodEntryRequest,
) -> Result<Recomputed, AppError> {
    let food_text = clean_food_text(&req.food_text)?;

    // skip the model call for entries the caller cannot touch
    if state.entries.get(user_id, entry_id).await?.is_none() {
        warn!(%user_id, %entry_id, "update of missing or foreign entry");
        return Err(not_found());
    }

    let analysis = state.parser.parse(&food_text).await;
    let updated = state
        .entries
        .update_text(user_id, entry_id, &food_text, &analysis)
        .await?
        .ok_or_else(not_found)?;

    Ok(state.aggregator.recompute(user_id, updated.date).await?)
}

pub async fn delete_entry(
    state: &AppState,
    user_id: Uuid,
    entry_id: Uuid,
) -> Result<Recomputed, AppError> {
    let Some(date) = state.entries.delete(user_id, entry_id).await? else {
        warn!(%user_id, %entry_id, "delete of missing or foreign entry");
        return Err(not_found());
    };
    Ok(state.aggregator.recompute(user_id, date).await?)
}
