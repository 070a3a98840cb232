mod dto;
pub mod handlers;
mod repo;
mod services;

pub use repo::{PgTipStore, TipStore};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::tip_routes()
}
