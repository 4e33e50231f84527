//! Access guard for the bookings listing.
//!
//! Per request:
//! 1. `Authorization: Bearer <token>` must be present, otherwise 401.
//! 2. The token must verify (signature + expiry), otherwise 401. The response
//!    is the same as for a missing header.
//! 3. The verified claims go into request extensions as `AuthCtx`.
//! 4. The `email` query parameter, when given, must equal the token subject,
//!    otherwise 403. Without it the listing is unfiltered, unless
//!    `require_owner_filter` is set, in which case that is a 403 too.
//!
//! Every rejection happens before the handler runs, so no storage is touched.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::dto::bookings::BookingFilter;
use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::IdentityClaim;
use crate::state::AppState;

/// Put the guard in front of every method registered on `route` so far.
///
/// ```ignore
/// .route("/bookings", access::guard_route(get(list_bookings), state).post(create_booking))
/// ```
pub fn guard_route(route: MethodRouter<AppState>, state: AppState) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(req.headers()) else {
        tracing::warn!("missing bearer credential");
        return Err(AppError::Unauthorized);
    };

    let claims = match state.tokens.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    let filter = Query::<BookingFilter>::try_from_uri(req.uri())
        .map(|Query(filter)| filter)
        .map_err(|_| AppError::bad_request("invalid query string"))?;

    check_owner(&claims.claim, filter.owner(), state.require_owner_filter)?;

    // middleware -> extractor handoff
    req.extensions_mut().insert(AuthCtx::new(claims));

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn check_owner(
    claim: &IdentityClaim,
    requested: Option<&str>,
    require_owner_filter: bool,
) -> Result<(), AppError> {
    match requested {
        Some(owner) if claim.subject() == Some(owner) => Ok(()),
        Some(owner) => {
            tracing::warn!(
                subject = ?claim.subject(),
                requested = %owner,
                "booking owner mismatch"
            );
            Err(AppError::Forbidden)
        }
        None if require_owner_filter => {
            tracing::warn!(subject = ?claim.subject(), "owner filter required");
            Err(AppError::Forbidden)
        }
        None => Ok(()),
    }
}
