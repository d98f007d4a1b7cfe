// SPDX-License-Identifier: MIT

//! Post feed routes.
//!
//! Like and delete are deliberately public, matching the demo's behavior.
//! An authorization gate would sit here once the credential backend issues
//! verifiable tokens.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::envelope::Envelope;
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::AppState;

const MAX_CONTENT_CHARS: usize = 500;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{id}", get(get_post).delete(delete_post))
        .route("/api/posts/{id}/like", put(like_post))
}

async fn list_posts(State(state): State<Arc<AppState>>) -> Json<Envelope<Vec<Post>>> {
    Json(Envelope::list(state.posts.list()))
}

#[derive(Deserialize)]
struct CreatePostRequest {
    content: Option<String>,
    author: Option<String>,
}

async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Envelope<Post>>)> {
    // Trim before the length check; surrounding whitespace never counts
    let content = body.content.as_deref().unwrap_or("").trim().to_string();
    if content.is_empty() {
        return Err(AppError::Validation("Post content is required".to_string()));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(AppError::Validation(
            "Post content cannot exceed 500 characters".to_string(),
        ));
    }

    let author = body
        .author
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or("Anonymous User")
        .to_string();

    let post = state.posts.create(author, content);
    tracing::info!(id = post.id, "Post created");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("Post created successfully", post)),
    ))
}

async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Envelope<Post>>> {
    let post = state
        .posts
        .get(id)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    Ok(Json(Envelope::data(post)))
}

async fn like_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Envelope<Post>>> {
    let post = state
        .posts
        .like(id)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    Ok(Json(Envelope::with_message("Post liked successfully", post)))
}

async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Envelope<Post>>> {
    let post = state
        .posts
        .delete(id)
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;
    tracing::info!(id, "Post deleted");
    Ok(Json(Envelope::with_message(
        "Post deleted successfully",
        post,
    )))
}
