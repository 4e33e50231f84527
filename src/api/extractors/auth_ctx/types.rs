/*
 * Responsibility
 * - The "authenticated request" context as seen by handlers
 * - The access guard verifies the token and stores this in request extensions
 *
 * Notes
 * - Token verification and the ownership check belong to the middleware
 */
use crate::services::auth::TokenClaims;

/// Context attached to requests that passed the access guard.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub claims: TokenClaims,
}

impl AuthCtx {
    pub fn new(claims: TokenClaims) -> Self {
        Self { claims }
    }

    /// Owner identity asserted by the token, if any.
    pub fn subject(&self) -> Option<&str> {
        self.claims.claim.subject()
    }
}
