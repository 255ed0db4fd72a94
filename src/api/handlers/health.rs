/*
 * Responsibility
 * - GET /        (liveness banner)
 * - GET /health  (reports the store backend in use)
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn root() -> &'static str {
    "Server is Running"
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "ok", "store": state.store.backend_name()})),
    )
}
