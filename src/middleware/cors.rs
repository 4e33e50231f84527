//! CORS for the storefront that books services from the browser.
//!
//! Tokens travel in the `Authorization` header, never in cookies, so
//! credentials are not allowed under any policy.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

/// Methods the route table actually serves.
const METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PATCH, Method::DELETE];

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(10 * 60);

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CorsPolicy {
    /// Development: every origin.
    AnyOrigin,
    /// Production: exact-match allowlist. Empty means no CORS headers at all.
    Allowlist(Vec<HeaderValue>),
}

impl CorsPolicy {
    fn from_config(config: &Config) -> Self {
        if !config.app_env.is_production() {
            return Self::AnyOrigin;
        }

        let origins = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring unusable CORS origin");
                    None
                }
            })
            .collect::<Vec<_>>();

        if origins.is_empty() {
            tracing::warn!("CORS allowlist is empty; browser clients will be refused");
        }
        Self::Allowlist(origins)
    }

    fn allow_origin(self) -> AllowOrigin {
        match self {
            Self::AnyOrigin => Any.into(),
            Self::Allowlist(origins) => AllowOrigin::list(origins),
        }
    }
}

pub fn apply(router: Router, config: &Config) -> Router {
    let origins = CorsPolicy::from_config(config).allow_origin();

    router.layer(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(METHODS)
            .allow_headers([
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                HeaderName::from_static("x-request-id"),
            ])
            .expose_headers([HeaderName::from_static("x-request-id")])
            .max_age(PREFLIGHT_MAX_AGE),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let mut map: HashMap<String, String> = HashMap::from([
            ("ACCESS_TOKEN_SECRET".to_string(), "s3cret".to_string()),
            ("STORAGE_BACKEND".to_string(), "memory".to_string()),
        ]);
        for (k, v) in pairs {
            map.insert(k.to_string(), v.to_string());
        }
        Config::from_lookup(|key| map.get(key).cloned()).unwrap()
    }

    #[test]
    fn development_allows_any_origin() {
        let policy = CorsPolicy::from_config(&config(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://shop.example",
        )]));
        assert_eq!(policy, CorsPolicy::AnyOrigin);
    }

    #[test]
    fn production_uses_the_allowlist() {
        let policy = CorsPolicy::from_config(&config(&[
            ("APP_ENV", "production"),
            (
                "CORS_ALLOWED_ORIGINS",
                "https://shop.example, https://admin.example",
            ),
        ]));
        assert_eq!(
            policy,
            CorsPolicy::Allowlist(vec![
                HeaderValue::from_static("https://shop.example"),
                HeaderValue::from_static("https://admin.example"),
            ])
        );
    }

    #[test]
    fn production_without_origins_allows_none() {
        let policy = CorsPolicy::from_config(&config(&[("APP_ENV", "production")]));
        assert_eq!(policy, CorsPolicy::Allowlist(Vec::new()));
    }
}
