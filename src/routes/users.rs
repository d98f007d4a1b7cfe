// SPDX-License-Identifier: MIT

//! User profile routes. Responses always carry the public projection;
//! email addresses never leave the server.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::envelope::Envelope;
use crate::error::{AppError, Result};
use crate::models::PublicUser;
use crate::store::{NewUser, UserUpdate};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user).put(update_user))
        .route("/api/users/username/{username}", get(get_user_by_username))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Json<Envelope<Vec<PublicUser>>> {
    let users = state
        .users
        .list()
        .iter()
        .map(|u| u.to_public())
        .collect();
    Json(Envelope::list(users))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Envelope<PublicUser>>> {
    let user = state
        .users
        .get(id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(Envelope::data(user.to_public())))
}

async fn get_user_by_username(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Envelope<PublicUser>>> {
    let user = state
        .users
        .get_by_username(&username)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(Envelope::data(user.to_public())))
}

#[derive(Deserialize)]
struct CreateUserRequest {
    username: Option<String>,
    email: Option<String>,
    name: Option<String>,
    #[serde(default)]
    bio: Option<String>,
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Envelope<PublicUser>>)> {
    let new = match (body.username, body.email, body.name) {
        (Some(username), Some(email), Some(name)) => NewUser {
            username,
            email,
            name,
            bio: body.bio.unwrap_or_default(),
        },
        _ => {
            return Err(AppError::Validation(
                "Username, email, and name are required".to_string(),
            ))
        }
    };

    let user = state.users.create(new)?;
    tracing::info!(id = user.id, username = %user.username, "User created");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message(
            "User created successfully",
            user.to_public(),
        )),
    ))
}

#[derive(Deserialize)]
struct UpdateUserRequest {
    name: Option<String>,
    bio: Option<String>,
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<Envelope<PublicUser>>> {
    let user = state
        .users
        .update(
            id,
            UserUpdate {
                name: body.name,
                bio: body.bio,
            },
        )
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(Envelope::with_message(
        "User updated successfully",
        user.to_public(),
    )))
}
