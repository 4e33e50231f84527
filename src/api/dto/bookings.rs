/*
 * Responsibility
 * - Bookings request/response DTOs
 * - Write results keep the `acknowledged / insertedId / matchedCount ...` shape clients expect
 * - Booking bodies themselves are not validated (schemaless documents)
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::repos::UpdateOutcome;

/// `GET /bookings` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilter {
    pub email: Option<String>,
}

impl BookingFilter {
    /// The requested owner. An empty `email=` counts as no filter.
    pub fn owner(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

/// `PATCH /bookings/{id}` body. Only `status` is applied; a missing status is stored as null.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertResult {
    pub fn new(id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateOutcome> for UpdateResult {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: outcome.matched,
            modified_count: outcome.modified,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}
