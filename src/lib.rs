// SPDX-License-Identifier: MIT

//! Frenup: a demonstration social-networking API and client.
//!
//! The server half exposes posts, users and a mock authentication flow
//! over in-memory stores. The client half wraps the REST surface and
//! drives the authentication session state machine.

pub mod auth;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use auth::CredentialBackend;
use config::Config;
use middleware::rate_limit::RateLimiter;
use store::{PostStore, UserStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub posts: Arc<dyn PostStore>,
    pub users: Arc<dyn UserStore>,
    pub auth: Arc<dyn CredentialBackend>,
    pub limiter: RateLimiter,
}
