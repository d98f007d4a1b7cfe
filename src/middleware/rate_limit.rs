// SPDX-License-Identifier: MIT

//! Fixed-window rate limiting per client IP.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Sweep expired windows once per this many checks, keeping the map bounded
/// by the set of clients seen within one window rather than ever seen.
const SWEEP_INTERVAL: u64 = 1024;

use crate::envelope::Envelope;
use crate::AppState;

/// Per-IP request counter over a fixed window.
pub struct RateLimiter {
    windows: DashMap<String, Window>,
    max: u32,
    window: Duration,
    checks: AtomicU64,
}

struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max,
            window,
            checks: AtomicU64::new(0),
        }
    }

    /// Count one request for `key`; returns false once the window is full.
    pub fn check(&self, key: &str) -> bool {
        // Sweep before taking the entry; retain while holding a shard lock
        // for the same key would deadlock.
        if self.checks.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == 0 {
            self.sweep_expired();
        }

        let mut entry = self.windows.entry(key.to_string()).or_insert_with(|| Window {
            started: Instant::now(),
            count: 0,
        });

        if entry.started.elapsed() >= self.window {
            entry.started = Instant::now();
            entry.count = 0;
        }

        entry.count += 1;
        entry.count <= self.max
    }

    /// Drop windows past their expiry so idle clients don't accumulate.
    fn sweep_expired(&self) {
        self.windows
            .retain(|_, window| window.started.elapsed() < self.window);
    }
}

/// Middleware enforcing the limit on `/api` routes.
pub async fn enforce_rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with("/api") {
        return next.run(request).await;
    }

    let key = client_key(&request);
    if state.limiter.check(&key) {
        next.run(request).await
    } else {
        tracing::warn!(client = %key, "Rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(Envelope::<()>::failure(
                "Too many requests from this IP, please try again later.",
            )),
        )
            .into_response()
    }
}

/// Best-effort client identity: forwarded header first, then the socket
/// address (absent under `oneshot` in tests).
fn client_key(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        })
        .unwrap_or_else(|| "local".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_fills_then_rejects() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));

        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
    }

    #[test]
    fn clients_are_counted_separately() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));

        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
        assert!(limiter.check("5.6.7.8"));
    }

    #[test]
    fn window_resets_after_expiry() {
        let limiter = RateLimiter::new(1, Duration::from_millis(10));

        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));

        std::thread::sleep(Duration::from_millis(15));
        assert!(limiter.check("1.2.3.4"));
    }

    #[test]
    fn expired_windows_are_evicted() {
        let limiter = RateLimiter::new(5, Duration::from_millis(10));

        limiter.check("1.2.3.4");
        limiter.check("5.6.7.8");
        assert_eq!(limiter.windows.len(), 2);

        std::thread::sleep(Duration::from_millis(15));
        limiter.sweep_expired();
        assert_eq!(limiter.windows.len(), 0);

        // A swept client starts over with a fresh window
        assert!(limiter.check("1.2.3.4"));
        assert_eq!(limiter.windows.len(), 1);
    }
}
