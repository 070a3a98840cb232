//! Bearer-token authentication against the external identity provider.

mod claims;
mod extractors;
pub mod handlers;
mod jwt;

pub use extractors::AuthUser;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::me_routes()
}
