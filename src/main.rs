// SPDX-License-Identifier: MIT

//! Frenup API Server
//!
//! Demo social-networking backend: posts, users and a mock authentication
//! flow over in-memory stores.

use frenup::{
    auth::DemoBackend,
    config::Config,
    error,
    middleware::rate_limit::RateLimiter,
    store::{MemoryPostStore, MemoryUserStore},
    AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");

    init_logging(config.is_development());
    error::set_development_mode(config.is_development());

    tracing::info!(
        port = config.port,
        environment = %config.environment,
        "Starting Frenup API"
    );

    let port = config.port;
    let limiter = RateLimiter::new(config.rate_limit_max, config.rate_limit_window());
    let auth = DemoBackend::new(config.demo_email.clone(), config.demo_password.clone());

    // Build shared state over seeded in-memory stores
    let state = Arc::new(AppState {
        posts: Arc::new(MemoryPostStore::with_seed_data()),
        users: Arc::new(MemoryUserStore::with_seed_data()),
        auth: Arc::new(auth),
        limiter,
        config,
    });

    // Build router
    let app = frenup::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

/// Compact logs for development, structured JSON otherwise.
fn init_logging(development: bool) {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("frenup=debug".parse().unwrap())
        .add_directive("info".parse().unwrap());

    if development {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        let format = tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true);

        tracing_subscriber::registry().with(filter).with(format).init();
    }
}
