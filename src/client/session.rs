// SPDX-License-Identifier: MIT

//! Client authentication session state machine.
//!
//! Tracks the session through `Anonymous`, `Loading`, `Authenticated` and
//! `Error`. Every transition into or out of `Authenticated` synchronizes
//! two side channels in the same call: the persisted token slot and the
//! API client's default bearer credential. Neither is ever updated lazily,
//! so a caller can never observe `Authenticated` without the credential
//! already attached.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::api::{ApiClient, ClientError};
use super::token_store::TokenStore;
use crate::auth::AuthUser;

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No credential held.
    Anonymous,
    /// A token check or credential submission is in flight.
    Loading,
    /// A user and token are held.
    Authenticated,
    /// The last operation failed; `last_error` carries the message.
    Error,
}

/// Observable session state.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: Option<AuthUser>,
    pub token: Option<String>,
    pub status: SessionStatus,
    pub last_error: Option<String>,
}

/// Drives session transitions against the API.
///
/// Transitions take `&mut self`, so each one is atomic with respect to any
/// observer of the same manager. The in-flight guard additionally rejects
/// a submission while another request is outstanding instead of racing it;
/// the guard releases when the request finishes or its future is dropped,
/// so an abandoned submission can never wedge the machine.
pub struct SessionManager {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    session: Session,
    /// Last non-error, non-loading status; `clear_error` restores it.
    /// A failed submission demotes this to `Anonymous`.
    prior_status: SessionStatus,
    in_flight: Arc<AtomicBool>,
}

/// Holds the in-flight flag for the duration of one request, releasing it
/// on drop. Futures abandoned at an await point release it too.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::Acquire) {
            None
        } else {
            Some(Self(flag.clone()))
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SessionManager {
    /// New manager, status `Loading` until `startup` resolves it.
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            tokens,
            session: Session {
                user: None,
                token: None,
                status: SessionStatus::Loading,
                last_error: None,
            },
            prior_status: SessionStatus::Anonymous,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.status == SessionStatus::Authenticated
    }

    /// Resolve the startup state: validate a persisted token if one exists,
    /// otherwise settle on `Anonymous`.
    pub async fn startup(&mut self) -> &Session {
        let Some(_guard) = self.begin_request("startup") else {
            return &self.session;
        };

        let Some(token) = self.tokens.load() else {
            self.enter_anonymous();
            return &self.session;
        };

        self.session.status = SessionStatus::Loading;
        // Attach the stored token so the who-am-I call is authenticated
        self.api.set_bearer(Some(token.clone()));

        let result = self.api.me().await;

        match result {
            Ok(user) => self.enter_authenticated(user, token),
            Err(err) => {
                tracing::warn!(error = %err, "Stored token rejected, discarding");
                self.enter_anonymous();
            }
        }
        &self.session
    }

    /// Submit login credentials.
    pub async fn login(&mut self, email: &str, password: &str) -> &Session {
        let Some(_guard) = self.begin_request("login") else {
            return &self.session;
        };

        self.session.status = SessionStatus::Loading;
        self.session.last_error = None;

        let result = self.api.login(email, password).await;

        match result {
            Ok(payload) => self.enter_authenticated(payload.user, payload.token),
            Err(err) => self.enter_error(&err),
        }
        &self.session
    }

    /// Submit a signup request.
    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        username: &str,
    ) -> &Session {
        let Some(_guard) = self.begin_request("signup") else {
            return &self.session;
        };

        self.session.status = SessionStatus::Loading;
        self.session.last_error = None;

        let result = self.api.register(email, password, name, username).await;

        match result {
            Ok(payload) => self.enter_authenticated(payload.user, payload.token),
            Err(err) => self.enter_error(&err),
        }
        &self.session
    }

    /// Log out. The server notification is best-effort; the local session
    /// always ends up `Anonymous` with the persisted token gone.
    pub async fn logout(&mut self) -> &Session {
        if self.session.token.is_some() {
            if let Err(err) = self.api.logout().await {
                tracing::warn!(error = %err, "Logout notification failed, continuing");
            }
        }
        self.enter_anonymous();
        &self.session
    }

    /// Dismiss an error, restoring the prior non-error state. Called when
    /// the user resumes typing.
    pub fn clear_error(&mut self) -> &Session {
        if self.session.status == SessionStatus::Error {
            self.session.status = self.prior_status;
            self.session.last_error = None;
        }
        &self.session
    }

    fn begin_request(&self, operation: &str) -> Option<InFlightGuard> {
        let guard = InFlightGuard::acquire(&self.in_flight);
        if guard.is_none() {
            tracing::warn!(operation, "Ignoring submission while a request is in flight");
        }
        guard
    }

    /// Single transition into `Authenticated`: session fields, persisted
    /// token and bearer credential all change together.
    fn enter_authenticated(&mut self, user: AuthUser, token: String) {
        if let Err(err) = self.tokens.save(&token) {
            tracing::warn!(error = %err, "Failed to persist token");
        }
        self.api.set_bearer(Some(token.clone()));

        self.session = Session {
            user: Some(user),
            token: Some(token),
            status: SessionStatus::Authenticated,
            last_error: None,
        };
        self.prior_status = SessionStatus::Authenticated;
    }

    /// Single transition into `Anonymous`: everything credential-shaped is
    /// dropped together.
    fn enter_anonymous(&mut self) {
        if let Err(err) = self.tokens.clear() {
            tracing::warn!(error = %err, "Failed to clear persisted token");
        }
        self.api.set_bearer(None);

        self.session = Session {
            user: None,
            token: None,
            status: SessionStatus::Anonymous,
            last_error: None,
        };
        self.prior_status = SessionStatus::Anonymous;
    }

    /// Failed submission: credential state is dropped, the message kept.
    fn enter_error(&mut self, err: &ClientError) {
        if let Err(clear_err) = self.tokens.clear() {
            tracing::warn!(error = %clear_err, "Failed to clear persisted token");
        }
        self.api.set_bearer(None);

        self.session = Session {
            user: None,
            token: None,
            status: SessionStatus::Error,
            last_error: Some(err.user_message()),
        };
        // The failed submission dropped the credentials above, so the only
        // state clear_error can restore to is Anonymous.
        self.prior_status = SessionStatus::Anonymous;
    }
}
