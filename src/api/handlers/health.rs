/*
 * Responsibility
 * - GET /       liveness text
 * - GET /health JSON status (for probes)
 * - Neither goes through the access guard
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn root() -> &'static str {
    "car doctors is running!!"
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
