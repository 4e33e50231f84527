use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind,
};
use thiserror::Error;

use crate::services::auth::claims::{IdentityClaim, TokenClaims};

/// Errors from issuing or verifying access tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("malformed token: {0}")]
    Malformed(jsonwebtoken::errors::Error),
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

impl TokenError {
    fn from_verify(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed(e),
        }
    }
}

/// HS256 access-token issuer and verifier.
///
/// Stateless: nothing is persisted, so a token stays valid until `exp`.
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Callers may put anything in the claim, including an `aud` we never configured.
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Sign `claim` into a token that expires `ttl_seconds` from now.
    pub fn issue(&self, claim: IdentityClaim) -> Result<String, TokenError> {
        self.issue_at(claim, Utc::now().timestamp())
    }

    /// Sign `claim` as if it had been issued at `iat` (unix seconds).
    pub fn issue_at(&self, claim: IdentityClaim, iat: i64) -> Result<String, TokenError> {
        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        let claims = TokenClaims {
            claim,
            iat,
            exp: iat.saturating_add(ttl),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Check signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from_verify)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn claim(value: serde_json::Value) -> IdentityClaim {
        IdentityClaim::try_from(value).unwrap()
    }

    #[test]
    fn verify_returns_the_issued_claim() {
        let service = TokenService::new("s3cret", 3600);
        let original = claim(json!({"user": "a@x.com", "roles": ["customer"], "n": 7}));

        let token = service.issue(original.clone()).unwrap();
        let decoded = service.verify(&token).unwrap();

        assert_eq!(decoded.claim, original);
        assert_eq!(decoded.exp - decoded.iat, 3600);
    }

    #[test]
    fn different_secret_fails_verification() {
        let issuer = TokenService::new("s3cret", 3600);
        let other = TokenService::new("not-the-secret", 3600);

        let token = issuer.issue(claim(json!({"user": "a@x.com"}))).unwrap();

        assert!(matches!(
            other.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn expired_token_fails_verification() {
        let service = TokenService::new("s3cret", 3600);
        let two_hours_ago = Utc::now().timestamp() - 7200;

        let token = service
            .issue_at(claim(json!({"user": "a@x.com"})), two_hours_ago)
            .unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn garbage_is_malformed() {
        let service = TokenService::new("s3cret", 3600);

        assert!(matches!(
            service.verify("not.a.jwt"),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(service.verify(""), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn caller_supplied_expiry_is_ignored() {
        let service = TokenService::new("s3cret", 60);
        let token = service
            .issue(claim(json!({"user": "a@x.com", "exp": 9_999_999_999i64})))
            .unwrap();

        let decoded = service.verify(&token).unwrap();
        assert_eq!(decoded.exp - decoded.iat, 60);
    }

    #[test]
    fn huge_ttl_never_expires_in_the_past() {
        let service = TokenService::new("s3cret", u64::MAX);
        let token = service.issue(claim(json!({"user": "a@x.com"}))).unwrap();

        let decoded = service.verify(&token).unwrap();
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn debug_does_not_leak_the_secret() {
        let service = TokenService::new("very-private", 3600);
        assert!(!format!("{:?}", service).contains("very-private"));
    }
}
