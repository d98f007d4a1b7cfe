// SPDX-License-Identifier: MIT

use axum::body::Body;
use axum::http::{header, Request};
use frenup::auth::DemoBackend;
use frenup::config::Config;
use frenup::middleware::rate_limit::RateLimiter;
use frenup::routes::create_router;
use frenup::store::{MemoryPostStore, MemoryUserStore};
use frenup::AppState;
use std::sync::Arc;

/// Create a test app over seeded in-memory stores.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::default())
}

/// Create a test app with a custom config (e.g. a tiny rate limit).
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        limiter: RateLimiter::new(config.rate_limit_max, config.rate_limit_window()),
        posts: Arc::new(MemoryPostStore::with_seed_data()),
        users: Arc::new(MemoryUserStore::with_seed_data()),
        auth: Arc::new(DemoBackend::new(
            config.demo_email.clone(),
            config.demo_password.clone(),
        )),
        config,
    });

    (create_router(state.clone()), state)
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build an empty-bodied request.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
