/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - catalog / booking repositories, the token service, guard policy
 * - Cloned per request, so everything inside is an Arc or Copy
 */
use std::sync::Arc;

use crate::repos::{BookingRepo, ServiceRepo};
use crate::services::auth::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceRepo>,
    pub bookings: Arc<dyn BookingRepo>,
    pub tokens: Arc<TokenService>,
    pub require_owner_filter: bool,
}

impl AppState {
    pub fn new(
        services: Arc<dyn ServiceRepo>,
        bookings: Arc<dyn BookingRepo>,
        tokens: Arc<TokenService>,
        require_owner_filter: bool,
    ) -> Self {
        Self {
            services,
            bookings,
            tokens,
            require_owner_filter,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("services", &self.services.backend_name())
            .field("bookings", &self.bookings.backend_name())
            .field("tokens", &self.tokens)
            .field("require_owner_filter", &self.require_owner_filter)
            .finish()
    }
}
