/*
 * Responsibility
 * - Take the `{id}` path segment and parse it into a document id
 * - A malformed id is a client error (400), never a storage error
 * Keep out of here
 *  - concrete collection names (see types.rs)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

pub struct DocumentId<T> {
    pub id: Uuid,
    _marker: PhantomData<T>,
}

impl<T> DocumentId<T> {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        Uuid::parse_str(raw.trim())
            .map(Self::new)
            .map_err(|_| AppError::bad_request("invalid id"))
    }
}

impl<T> Clone for DocumentId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DocumentId<T> {}

impl<T, S> FromRequestParts<S> for DocumentId<T>
where
    T: Send + Sync,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("invalid id"))?;
        Self::parse(&raw)
    }
}

impl<T> std::fmt::Debug for DocumentId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentId").field("id", &self.id).finish()
    }
}
