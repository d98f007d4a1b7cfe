// SPDX-License-Identifier: MIT

//! HTTP client for the Frenup API.
//!
//! Thin typed wrapper over `reqwest`. The bearer slot is shared with the
//! session manager, which updates it on every auth transition so that all
//! subsequent requests carry the right credential.

use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};

use crate::auth::{AuthPayload, AuthUser};
use crate::envelope::Envelope;
use crate::models::{Post, PublicUser};

/// Errors surfaced by the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a failure envelope.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never completed.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered, but not with the envelope we expect.
    #[error("malformed response from server")]
    Malformed,
}

impl ClientError {
    /// Message safe to show to the user: server-provided for API failures,
    /// generic for everything else.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Typed client for the REST surface.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Arc<Mutex<Option<String>>>,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the default bearer credential for all future requests.
    pub fn set_bearer(&self, token: Option<String>) {
        *self.bearer.lock().unwrap() = token;
    }

    /// The currently attached bearer credential, if any.
    pub fn bearer(&self) -> Option<String> {
        self.bearer.lock().unwrap().clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ─── Auth ────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.post_data("/api/auth/login", &body).await
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        username: &str,
    ) -> Result<AuthPayload, ClientError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "name": name,
            "username": username,
        });
        self.post_data("/api/auth/register", &body).await
    }

    pub async fn me(&self) -> Result<AuthUser, ClientError> {
        self.get_data("/api/auth/me").await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let body = serde_json::json!({});
        self.send::<serde_json::Value>(self.http.post(self.url("/api/auth/logout")).json(&body))
            .await?;
        Ok(())
    }

    // ─── Posts ───────────────────────────────────────────────────

    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.get_data("/api/posts").await
    }

    pub async fn get_post(&self, id: u64) -> Result<Post, ClientError> {
        self.get_data(&format!("/api/posts/{id}")).await
    }

    pub async fn create_post(
        &self,
        content: &str,
        author: Option<&str>,
    ) -> Result<Post, ClientError> {
        let body = serde_json::json!({ "content": content, "author": author });
        self.post_data("/api/posts", &body).await
    }

    pub async fn like_post(&self, id: u64) -> Result<Post, ClientError> {
        let envelope = self
            .send(self.http.put(self.url(&format!("/api/posts/{id}/like"))))
            .await?;
        envelope.data.ok_or(ClientError::Malformed)
    }

    pub async fn delete_post(&self, id: u64) -> Result<Post, ClientError> {
        let envelope = self
            .send(self.http.delete(self.url(&format!("/api/posts/{id}"))))
            .await?;
        envelope.data.ok_or(ClientError::Malformed)
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<PublicUser>, ClientError> {
        self.get_data("/api/users").await
    }

    pub async fn get_user(&self, id: u64) -> Result<PublicUser, ClientError> {
        self.get_data(&format!("/api/users/{id}")).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<PublicUser, ClientError> {
        self.get_data(&format!("/api/users/username/{username}")).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        name: &str,
        bio: &str,
    ) -> Result<PublicUser, ClientError> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "name": name,
            "bio": bio,
        });
        self.post_data("/api/users", &body).await
    }

    pub async fn update_user(
        &self,
        id: u64,
        name: Option<&str>,
        bio: Option<&str>,
    ) -> Result<PublicUser, ClientError> {
        let body = serde_json::json!({ "name": name, "bio": bio });
        let envelope = self
            .send(self.http.put(self.url(&format!("/api/users/{id}"))).json(&body))
            .await?;
        envelope.data.ok_or(ClientError::Malformed)
    }

    // ─── Plumbing ────────────────────────────────────────────────

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let envelope = self.send(self.http.get(self.url(path))).await?;
        envelope.data.ok_or(ClientError::Malformed)
    }

    async fn post_data<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ClientError> {
        let envelope = self.send(self.http.post(self.url(path)).json(body)).await?;
        envelope.data.ok_or(ClientError::Malformed)
    }

    /// Attach the bearer credential, send, and interpret the envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ClientError> {
        let request = match self.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        let envelope: Envelope<T> = response.json().await.map_err(|_| ClientError::Malformed)?;

        if !status.is_success() || !envelope.success {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "Request failed".to_string()),
            });
        }

        Ok(envelope)
    }
}
