/*
 * Responsibility
 * - URL structure of the service
 * - Decides which routes sit behind the access guard (only GET /bookings)
 */
use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::handlers::{
    bookings::{create_booking, delete_booking, list_bookings, update_booking},
    health::{health, root},
    jwt::issue_token,
    services::{get_service, list_services},
};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/jwt", post(issue_token))
        .route("/services", get(list_services))
        .route("/services/{id}", get(get_service))
        .route(
            "/bookings",
            // route_layer wraps only the methods registered before it, so POST stays open.
            access::guard_route(get(list_bookings), state).post(create_booking),
        )
        .route(
            "/bookings/{id}",
            patch(update_booking).delete(delete_booking),
        )
}
