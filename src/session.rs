//! # Session
//!
//! The signed-in admin and their bearer token. A `Session` is passed explicitly to the
//! REST layer; clones share the same state.
//!
//! When the backend answers 401 the transport calls [`Session::invalidate`], which clears
//! the token and tells subscribers to send the user to the login entry point. Collection
//! actors never see this flow, they only receive the `Unauthorized` error.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

/// The authenticated account, as returned by `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Sign-up payload for `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(User),
    SignedOut,
    /// The token was rejected; the consumer should route to `redirect_to`.
    LoginRequired { redirect_to: String },
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Shared session handle.
#[derive(Clone)]
pub struct Session {
    state: Arc<RwLock<SessionState>>,
    events: broadcast::Sender<SessionEvent>,
    login_path: Arc<str>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("login_path", &self.login_path)
            .finish()
    }
}

impl Session {
    pub fn new(login_path: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            events,
            login_path: Arc::from(login_path.into()),
        }
    }

    /// A session that already holds a token, e.g. one restored by the caller.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.write(|state| state.token = Some(token.into()));
        self
    }

    /// Token-provider capability used by the transport.
    pub fn token(&self) -> Option<String> {
        self.read(|state| state.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.read(|state| state.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(|state| state.token.is_some())
    }

    pub fn is_admin(&self) -> bool {
        self.read(|state| matches!(&state.user, Some(user) if user.role == Role::Admin))
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn sign_in(&self, user: User, token: impl Into<String>) {
        info!(user = %user.email, "Signed in");
        self.write(|state| {
            state.token = Some(token.into());
            state.user = Some(user.clone());
        });
        let _ = self.events.send(SessionEvent::SignedIn(user));
    }

    pub fn logout(&self) {
        info!("Signed out");
        self.clear();
        let _ = self.events.send(SessionEvent::SignedOut);
    }

    /// Drop the token after the backend rejected it and request a login.
    pub fn invalidate(&self) {
        warn!(redirect_to = %self.login_path, "Session rejected by server");
        self.clear();
        let _ = self.events.send(SessionEvent::LoginRequired {
            redirect_to: self.login_path.to_string(),
        });
    }

    fn clear(&self) {
        self.write(|state| {
            state.token = None;
            state.user = None;
        });
    }

    fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}
