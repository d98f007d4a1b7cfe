// SPDX-License-Identifier: MIT

//! Mock authentication routes.
//!
//! All credential logic lives behind the `CredentialBackend` trait; these
//! handlers only check field presence and shape the envelope.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::{AuthPayload, AuthUser, Registration};
use crate::envelope::Envelope;
use crate::error::{AppError, Result};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
}

#[derive(Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Envelope<AuthPayload>>> {
    let (email, password) = match (body.email, body.password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ))
        }
    };

    let payload = state.auth.login(&email, &password)?;
    tracing::info!(email = %email, "Login successful");

    Ok(Json(Envelope::with_message("Login successful", payload)))
}

#[derive(Deserialize)]
struct RegisterRequest {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
    username: Option<String>,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<AuthPayload>>)> {
    let registration = match (body.email, body.password, body.name, body.username) {
        (Some(email), Some(password), Some(name), Some(username)) => Registration {
            email,
            password,
            name,
            username,
        },
        _ => return Err(AppError::Validation("All fields are required".to_string())),
    };

    let payload = state.auth.register(registration)?;
    tracing::info!(username = %payload.user.username, "Registration successful");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("Registration successful", payload)),
    ))
}

/// Current user. The demo backend ignores whatever token was supplied,
/// so this must never be used as an authorization check.
async fn me(State(state): State<Arc<AppState>>) -> Json<Envelope<AuthUser>> {
    Json(Envelope::data(state.auth.current_user()))
}

/// Acknowledge a client logout. Sessions are client-held, so there is
/// nothing to invalidate server-side.
async fn logout() -> Json<Envelope<()>> {
    Json(Envelope {
        success: true,
        message: Some("Logged out".to_string()),
        data: None,
        count: None,
    })
}
