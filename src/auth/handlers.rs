use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use super::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip_all)]
pub async fn get_me(AuthUser(user_id): AuthUser) -> Json<MeResponse> {
    Json(MeResponse { user_id })
}

#[cfg(test)]
mod tests {
    use crate::testing::{bearer, get_json, send, TestApp};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn me_echoes_the_token_subject() {
        let app = TestApp::new();
        let user = Uuid::new_v4();
        let (status, body) = get_json(&app, user, "/api/v1/me").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"user_id": user}));
    }

    #[tokio::test]
    async fn protected_routes_need_a_valid_token() {
        let app = TestApp::new();
        for uri in [
            "/api/v1/me",
            "/api/v1/food-entry?date=2024-01-01",
            "/api/v1/daily-summary?date=2024-01-01",
            "/api/v1/tips?date=2024-01-01",
        ] {
            let req = Request::get(uri).body(Body::empty()).unwrap();
            let (status, body) = send(&app, req).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body, json!({"error": "missing Authorization header"}));
        }

        let req = Request::get("/api/v1/me")
            .header(header::AUTHORIZATION, "Bearer not.a.jwt")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let req = Request::get("/api/v1/me")
            .header(header::AUTHORIZATION, bearer(Uuid::new_v4()).replace("Bearer", "Basic"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid auth scheme");
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = TestApp::new();
        let req = Request::get("/api/v1/health").body(Body::empty()).unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
    }
}
