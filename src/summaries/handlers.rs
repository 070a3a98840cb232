use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use super::dto::{
    CalendarSummaryQuery, CalendarSummaryResponse, DailyStats, DailySummaryQuery,
    DailySummaryResponse, WeeklySummaryQuery, WeeklySummaryResponse, YearMonth,
};
use super::services;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

pub fn summary_routes() -> Router<AppState> {
    Router::new()
        .route("/daily-summary", get(daily_summary))
        .route("/weekly-summary", get(weekly_summary))
        .route("/calendar-summary", get(calendar_summary))
}

#[instrument(skip(state, query))]
pub async fn daily_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<DailySummaryQuery>, QueryRejection>,
) -> Result<Json<DailySummaryResponse>, AppError> {
    let Query(q) = query?;
    let view = services::daily_summary(&state, user_id, q.date).await?;
    let summary = view.summary;
    Ok(Json(DailySummaryResponse {
        date: summary.date,
        gut_score: summary.scores.gut_score,
        stats: DailyStats::from(&summary.scores),
        status: summary.status,
        entry_count: view.entry_count,
    }))
}

#[instrument(skip(state, query))]
pub async fn weekly_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<WeeklySummaryQuery>, QueryRejection>,
) -> Result<Json<WeeklySummaryResponse>, AppError> {
    let Query(q) = query?;
    let (end, trend) = services::weekly_summary(&state, user_id, q.start).await?;
    Ok(Json(WeeklySummaryResponse {
        start: q.start,
        end,
        trend,
    }))
}

#[instrument(skip(state, query))]
pub async fn calendar_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<CalendarSummaryQuery>, QueryRejection>,
) -> Result<Json<CalendarSummaryResponse>, AppError> {
    let Query(q) = query?;
    let month: YearMonth = q.month.parse().map_err(|e: String| {
        warn!(month = %q.month, "rejected calendar month");
        AppError::BadRequest(e)
    })?;
    let days = services::calendar_summary(&state, user_id, month).await?;
    Ok(Json(CalendarSummaryResponse { month, days }))
}
