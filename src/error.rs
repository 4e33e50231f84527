/*
 * Responsibility
 * - The application-wide AppError
 * - IntoResponse (HTTP status + `{ error: true, message }` JSON body)
 * - Uniform conversion of repo / token errors; backend detail is logged, never sent
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::TokenError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("unauthorized access")]
    Unauthorized,
    #[error("forbidden access")]
    Forbidden,
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("request body too large")]
    PayloadTooLarge,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: true,
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "storage operation failed");
        AppError::Internal
    }
}

// Body rejections keep the `{ error, message }` shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }

        tracing::debug!(error = %rejection, "rejected request body");
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                AppError::bad_request("expected content-type: application/json")
            }
            JsonRejection::JsonSyntaxError(_) => AppError::bad_request("malformed JSON body"),
            JsonRejection::JsonDataError(_) => AppError::bad_request("unexpected JSON body"),
            other => AppError::bad_request(other.body_text()),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Signing(err) => {
                tracing::error!(error = %err, "failed to sign access token");
                AppError::Internal
            }
            // Verification failures are deliberately indistinguishable from a
            // missing credential on the wire.
            TokenError::Expired | TokenError::InvalidSignature | TokenError::Malformed(_) => {
                AppError::Unauthorized
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn auth_errors_use_fixed_messages() {
        let (status, body) = render(AppError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            serde_json::json!({"error": true, "message": "unauthorized access"})
        );

        let (status, body) = render(AppError::Forbidden).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            serde_json::json!({"error": true, "message": "forbidden access"})
        );
    }

    #[tokio::test]
    async fn repo_errors_are_sanitized() {
        let err: AppError = RepoError::Db(sqlx::Error::PoolTimedOut).into();
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
    }

    #[tokio::test]
    async fn oversized_body_keeps_the_error_shape() {
        let (status, body) = render(AppError::PayloadTooLarge).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body,
            serde_json::json!({"error": true, "message": "request body too large"})
        );
    }

    #[test]
    fn token_failures_map_to_unauthorized() {
        assert!(matches!(
            AppError::from(TokenError::Expired),
            AppError::Unauthorized
        ));
        assert!(matches!(
            AppError::from(TokenError::InvalidSignature),
            AppError::Unauthorized
        ));
    }
}
