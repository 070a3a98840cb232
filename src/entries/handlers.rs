use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    CreateFoodEntryRequest, CreatedFoodEntryResponse, EntryDateQuery, FoodEntriesResponse,
    MutatedFoodEntryResponse, UpdateFoodEntryRequest,
};
use super::services;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

pub fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/food-entry", get(list_entries).post(create_entry))
        .route("/food-entry/:id", put(update_entry).delete(delete_entry))
}

#[instrument(skip(state, query))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<EntryDateQuery>, QueryRejection>,
) -> Result<Json<FoodEntriesResponse>, AppError> {
    let Query(q) = query?;
    let entries = services::list_entries(&state, user_id, q.date).await?;
    Ok(Json(FoodEntriesResponse {
        date: q.date,
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state, body))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<CreateFoodEntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedFoodEntryResponse>), AppError> {
    let Json(req) = body?;
    let (entry, summary) = services::create_entry(&state, user_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedFoodEntryResponse {
            message: "Food entry added",
            entry_id: entry.id,
            updated_gut_score: summary.gut_score,
            status: summary.status,
        }),
    ))
}

#[instrument(skip(state, path, body))]
pub async fn update_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateFoodEntryRequest>, JsonRejection>,
) -> Result<Json<MutatedFoodEntryResponse>, AppError> {
    let Path(entry_id) = path?;
    let Json(req) = body?;
    let summary = services::update_entry(&state, user_id, entry_id, req).await?;
    Ok(Json(MutatedFoodEntryResponse {
        message: "Food entry updated",
        updated_gut_score: summary.gut_score,
        status: summary.status,
    }))
}

#[instrument(skip(state, path))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MutatedFoodEntryResponse>, AppError> {
    let Path(entry_id) = path?;
    let summary = services::delete_entry(&state, user_id, entry_id).await?;
    Ok(Json(MutatedFoodEntryResponse {
        message: "Food entry deleted",
        updated_gut_score: summary.gut_score,
        status: summary.status,
    }))
}
