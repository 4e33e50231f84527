//! Identity claims carried inside access tokens.
//!
//! The claim is whatever JSON object the caller asserted at `/jwt`; nothing is
//! checked against a user store. The only field the server interprets is the
//! subject, used by the bookings guard for its ownership check.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields looked up, in order, to find the subject of a claim.
pub const SUBJECT_FIELDS: [&str; 2] = ["email", "user"];

/// Registered claims owned by the token service. Caller values are dropped.
const RESERVED_FIELDS: [&str; 2] = ["iat", "exp"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("identity claim must be a JSON object")]
    NotAnObject,
}

/// Opaque caller-supplied identity payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityClaim(Map<String, Value>);

impl IdentityClaim {
    pub fn new(mut fields: Map<String, Value>) -> Self {
        for key in RESERVED_FIELDS {
            fields.remove(key);
        }
        Self(fields)
    }

    /// The asserted owner identity, if the claim carries one as a string.
    pub fn subject(&self) -> Option<&str> {
        SUBJECT_FIELDS
            .iter()
            .find_map(|field| self.0.get(*field).and_then(Value::as_str))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Value> for IdentityClaim {
    type Error = ClaimError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            _ => Err(ClaimError::NotAnObject),
        }
    }
}

/// Decoded token body: the identity claim plus issued-at / expiry (unix seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub claim: IdentityClaim,
    pub iat: i64,
    pub exp: i64,
}
