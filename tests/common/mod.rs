#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use car_doctor::{
    app::build_router,
    config::Config,
    repos::{Document, MemoryBookingRepo, MemoryServiceRepo},
    services::auth::{IdentityClaim, TokenService},
    state::AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub tokens: Arc<TokenService>,
    pub services: Arc<MemoryServiceRepo>,
    pub bookings: Arc<MemoryBookingRepo>,
}

pub fn config(extra: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = HashMap::from([
        ("ACCESS_TOKEN_SECRET".to_string(), SECRET.to_string()),
        ("STORAGE_BACKEND".to_string(), "memory".to_string()),
    ]);
    for (k, v) in extra {
        map.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| map.get(key).cloned()).expect("test config")
}

pub fn app_with(catalog: Vec<Document>, extra: &[(&str, &str)]) -> TestApp {
    let config = config(extra);
    let tokens = Arc::new(TokenService::new(
        &config.access_token_secret,
        config.access_token_ttl_seconds,
    ));
    let services = Arc::new(MemoryServiceRepo::with_entries(catalog));
    let bookings = Arc::new(MemoryBookingRepo::new());

    let state = AppState::new(
        services.clone(),
        bookings.clone(),
        tokens.clone(),
        config.require_owner_filter,
    );

    TestApp {
        router: build_router(state, &config),
        tokens,
        services,
        bookings,
    }
}

pub fn app() -> TestApp {
    app_with(Vec::new(), &[])
}

pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

impl TestApp {
    pub fn token_for(&self, claim: Value) -> String {
        self.tokens
            .issue(IdentityClaim::try_from(claim).unwrap())
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.send(builder.body(body.into()).unwrap()).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}
