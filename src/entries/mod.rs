mod dto;
pub mod handlers;
mod repo;
mod repo_types;
mod services;

pub use repo::{EntryStore, PgEntryStore};
pub use repo_types::{FoodEntry, MealType, NewFoodEntry};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::entry_routes()
}
