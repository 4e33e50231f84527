/*
 * Responsibility
 * - /bookings CRUD handlers
 * - list_bookings sits behind the access guard, which has already enforced
 *   that the `email` filter (if any) belongs to the caller
 * - create / update / delete are open, like the catalog
 */
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    api::{
        dto::bookings::{BookingFilter, DeleteResult, InsertResult, StatusUpdate, UpdateResult},
        extractors::{AuthCtxExtractor, BookingId, JsonBody},
    },
    error::AppError,
    repos::Document,
    state::AppState,
};

pub async fn list_bookings(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    Query(filter): Query<BookingFilter>,
) -> Result<Json<Vec<Document>>, AppError> {
    let owner = filter.owner();
    if owner.is_none() {
        tracing::info!(subject = ?auth.subject(), "listing all bookings (no owner filter)");
    }

    let rows = state.bookings.list(owner).await?;

    Ok(Json(
        rows.into_iter().map(|row| row.into_document()).collect(),
    ))
}

pub async fn create_booking(
    State(state): State<AppState>,
    JsonBody(booking): JsonBody<Document>,
) -> Result<Json<InsertResult>, AppError> {
    let id = state.bookings.create(booking).await?;

    tracing::debug!(booking_id = %id, "booking created");
    Ok(Json(InsertResult::new(id)))
}

pub async fn update_booking(
    State(state): State<AppState>,
    booking_id: BookingId,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<UpdateResult>, AppError> {
    tracing::debug!(booking_id = %booking_id.id, status = %update.status, "updating booking status");

    let outcome = state
        .bookings
        .update_status(booking_id.id, update.status)
        .await?;

    Ok(Json(outcome.into()))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    booking_id: BookingId,
) -> Result<Json<DeleteResult>, AppError> {
    let deleted = state.bookings.delete(booking_id.id).await?;

    Ok(Json(DeleteResult::new(deleted)))
}
