/*
 * Responsibility
 * - /jwt response body
 * - The request body is an arbitrary JSON object (see IdentityClaim)
 */
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
