/*
 * Responsibility
 * - Config loading -> dependency construction -> Router assembly
 * - Middleware wiring (security headers / CORS / HTTP layers)
 * - Start serving with axum::serve()
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    repos::build_repos,
    services::auth::build_token_service,
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG wins when set, e.g. RUST_LOG=info,car_doctor=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr may be hidden depending on how the process is launched
        tracing::error!(%info, "panic");

        // Development: crash loudly. Production: log and keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(?config, "starting car doctor in {:?} mode", config.app_env);

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("car doctors running on port: {}", config.addr.port());
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build process-level dependencies once and inject them through `AppState`.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let repos = build_repos(&config.storage).await?;
    let tokens = build_token_service(config);

    if !config.require_owner_filter {
        tracing::warn!(
            "GET /bookings without an email filter returns every booking to any valid token"
        );
    }

    Ok(AppState::new(
        repos.services,
        repos.bookings,
        tokens,
        config.require_owner_filter,
    ))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes(state.clone()).with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
