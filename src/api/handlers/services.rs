/*
 * Responsibility
 * - /services catalog reads (public)
 */
use axum::{Json, extract::State};

use crate::{
    api::{dto::services::ServiceSummary, extractors::ServiceId},
    error::AppError,
    repos::Document,
    state::AppState,
};

pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let entries = state.services.list().await?;

    Ok(Json(
        entries.into_iter().map(|entry| entry.into_document()).collect(),
    ))
}

pub async fn get_service(
    State(state): State<AppState>,
    service_id: ServiceId,
) -> Result<Json<ServiceSummary>, AppError> {
    let entry = state
        .services
        .get(service_id.id)
        .await?
        .ok_or(AppError::not_found("service"))?;

    Ok(Json(ServiceSummary::from(entry)))
}
