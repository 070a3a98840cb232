use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{GenerateTipsRequest, TipsQuery, TipsResponse};
use super::services;
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

pub fn tip_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-tips", post(generate_tips))
        .route("/tips", get(get_tips))
}

#[instrument(skip(state, body))]
pub async fn generate_tips(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<GenerateTipsRequest>, JsonRejection>,
) -> Result<Json<TipsResponse>, AppError> {
    let Json(req) = body?;
    let tips = services::generate_tips(&state, user_id, req.date).await?;
    Ok(Json(TipsResponse {
        date: req.date,
        tips,
    }))
}

#[instrument(skip(state, query))]
pub async fn get_tips(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<TipsQuery>, QueryRejection>,
) -> Result<Json<TipsResponse>, AppError> {
    let Query(q) = query?;
    let tips = services::get_tips(&state, user_id, q.date).await?;
    Ok(Json(TipsResponse { date: q.date, tips }))
}
