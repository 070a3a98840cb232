use time::Date;
use tracing::debug;
use uuid::Uuid;

use super::repo::TipStore;
use crate::error::AppError;
use crate::llm::{TipGenerator, TipScores};
use crate::state::AppState;
use crate::summaries::{DailySummary, SummaryStore};

/// Generates tips from the day's stored sub-scores (zeros when nothing is stored) and
/// replaces any tips already logged for that day.
pub async fn generate_tips(
    state: &AppState,
    user_id: Uuid,
    date: Date,
) -> Result<Vec<String>, AppError> {
    let summary = state
        .summaries
        .get(user_id, date)
        .await?
        .unwrap_or_else(|| DailySummary::baseline(user_id, date));

    let tips = state
        .tip_generator
        .generate(TipScores::from(&summary.scores))
        .await
        .to_vec();
    state.tips.upsert(user_id, date, &tips).await?;
    debug!(%date, "tips logged");
    Ok(tips)
}

pub async fn get_tips(state: &AppState, user_id: Uuid, date: Date) -> Result<Vec<String>, AppError> {
    state
        .tips
        .get(user_id, date)
        .await?
        .ok_or_else(|| AppError::NotFound("No tips generated for this date".into()))
}
