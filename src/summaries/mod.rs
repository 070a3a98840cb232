//! Daily summaries: recompute after every entry mutation, plus day/week/month reads.

mod dto;
pub mod handlers;
mod locks;
mod repo;
mod repo_types;
mod services;
mod trend;

pub use repo::{PgSummaryStore, SummaryStore};
pub use repo_types::DailySummary;
pub use services::{Recomputed, RecomputeError, SummaryAggregator};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::summary_routes()
}
