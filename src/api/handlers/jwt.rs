/*
 * Responsibility
 * - POST /jwt: sign whatever identity the caller asserts
 * - No user store is consulted; the guard on /bookings is what limits the damage
 */
use axum::{Json, extract::State};
use serde_json::Value;

use crate::{
    api::{dto::token::TokenResponse, extractors::JsonBody},
    error::AppError,
    services::auth::IdentityClaim,
    state::AppState,
};

pub async fn issue_token(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<TokenResponse>, AppError> {
    let claim = IdentityClaim::try_from(body).map_err(|e| AppError::bad_request(e.to_string()))?;

    let subject = claim.subject().map(str::to_owned);
    let token = state.tokens.issue(claim)?;

    tracing::info!(subject = ?subject, "issued access token");
    Ok(Json(TokenResponse { token }))
}
