//! Response headers for a JSON-only API that hands out bearer tokens.
//!
//! Nothing here is ever rendered as a page, so framing and sniffing are denied,
//! and `no-store` keeps issued tokens and booking lists out of shared caches.
//! A handler that sets one of these headers itself wins.

use axum::Router;
use axum::http::header::{self, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

fn headers() -> [(HeaderName, HeaderValue); 5] {
    [
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ),
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
        (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
    ]
}

pub fn apply(router: Router) -> Router {
    headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(name, value))
        })
}
