// SPDX-License-Identifier: MIT

//! Credential verification and token issuance.
//!
//! The handlers only see the [`CredentialBackend`] trait, so the shipped
//! demo backend can be swapped for a real identity provider without touching
//! any route code. The demo backend accepts exactly one credential pair and
//! hands out placeholder tokens that nothing ever verifies.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// User payload returned by the auth endpoints. Distinct from the store's
/// `User`: the auth flow never touches the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub username: String,
}

/// Successful login/registration payload: the user plus their token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: AuthUser,
    pub token: String,
}

/// Validated registration input. Field presence is checked at the HTTP
/// boundary; password policy is enforced here.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub username: String,
}

/// Pluggable credential verification and token issuance.
pub trait CredentialBackend: Send + Sync {
    /// Verify a credential pair, returning the session payload on success.
    fn login(&self, email: &str, password: &str) -> Result<AuthPayload>;

    /// Register a new account and issue its first token.
    fn register(&self, registration: Registration) -> Result<AuthPayload>;

    /// The user behind the current request.
    ///
    /// The demo backend performs no token verification and always answers
    /// with the same fixed user, so callers must not use this to authorize
    /// anything.
    fn current_user(&self) -> AuthUser;
}

/// Demo backend: one hardcoded credential pair, placeholder tokens.
pub struct DemoBackend {
    email: String,
    password: String,
}

/// The token handed out for the fixed demo login.
pub const DEMO_TOKEN: &str = "demo-jwt-token-12345";

const MIN_PASSWORD_LEN: usize = 6;

impl DemoBackend {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn demo_user(&self) -> AuthUser {
        AuthUser {
            id: 1,
            email: self.email.clone(),
            name: "Demo User".to_string(),
            username: "demouser".to_string(),
        }
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new("demo@frenup.com", "demo123")
    }
}

impl CredentialBackend for DemoBackend {
    fn login(&self, email: &str, password: &str) -> Result<AuthPayload> {
        if email == self.email && password == self.password {
            Ok(AuthPayload {
                user: self.demo_user(),
                token: DEMO_TOKEN.to_string(),
            })
        } else {
            Err(AppError::Auth("Invalid credentials".to_string()))
        }
    }

    fn register(&self, registration: Registration) -> Result<AuthPayload> {
        if registration.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        // Millisecond timestamps are unique enough for a demo; two calls in
        // the same millisecond would collide.
        let issued_at = Utc::now().timestamp_millis() as u64;

        Ok(AuthPayload {
            user: AuthUser {
                id: issued_at,
                email: registration.email,
                name: registration.name,
                username: registration.username,
            },
            token: format!("demo-jwt-token-{issued_at}"),
        })
    }

    fn current_user(&self) -> AuthUser {
        self.demo_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn registration(password: &str) -> Registration {
        Registration {
            email: "new@frenup.com".to_string(),
            password: password.to_string(),
            name: "New User".to_string(),
            username: "newuser".to_string(),
        }
    }

    #[test]
    fn login_accepts_only_the_demo_pair() {
        let backend = DemoBackend::default();

        assert!(backend.login("demo@frenup.com", "demo123").is_ok());
        assert!(matches!(
            backend.login("demo@frenup.com", "wrong"),
            Err(AppError::Auth(_))
        ));
        assert!(matches!(
            backend.login("other@frenup.com", "demo123"),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn login_returns_the_static_token() {
        let backend = DemoBackend::default();
        let payload = backend.login("demo@frenup.com", "demo123").unwrap();
        assert_eq!(payload.token, DEMO_TOKEN);
        assert_eq!(payload.user.username, "demouser");
    }

    #[test]
    fn register_rejects_short_passwords() {
        let backend = DemoBackend::default();
        let result = backend.register(registration("short"));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn register_issues_distinct_ids_across_milliseconds() {
        let backend = DemoBackend::default();

        let first = backend.register(registration("secret1")).unwrap();
        sleep(Duration::from_millis(2));
        let second = backend.register(registration("secret2")).unwrap();

        assert_ne!(first.user.id, second.user.id);
        assert_ne!(first.token, second.token);
        assert!(first.token.starts_with("demo-jwt-token-"));
    }
}
