//! Authenticated sessions and their storage.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::chat::{Conversation, ReplySettings};

/// Login rejection.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// The single identifier/secret pair the gate accepts.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// "email / password", shown on the login page and in rejections.
    #[must_use]
    pub fn hint(&self) -> String {
        format!("{} / {}", self.email, self.password)
    }
}

/// A logged-in user and their conversation.
///
/// Created by [`SessionStore::login`], destroyed by [`SessionStore::logout`],
/// read-only in between.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Opaque token carried in the session cookie.
    token: String,
    email: String,
    created_at: DateTime<Utc>,
    conversation: Conversation,
}

impl Session {
    fn new(email: String, reply: ReplySettings) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                token: Uuid::new_v4().to_string(),
                email,
                created_at: Utc::now(),
                conversation: Conversation::new(reply),
            }),
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.inner.token
    }

    /// The logged-in identifier.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.inner.email
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.inner.conversation
    }
}

/// Thread-safe store for sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<String, Session>>,
    credentials: Credentials,
    reply: ReplySettings,
    redirect_delay: Duration,
}

impl SessionStore {
    /// Create an empty store accepting `credentials`.
    #[must_use]
    pub fn new(credentials: Credentials, reply: ReplySettings, redirect_delay: Duration) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
                credentials,
                reply,
                redirect_delay,
            }),
        }
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Pause between a successful login and entering the chat.
    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        self.inner.redirect_delay
    }

    /// Create a session if `email` and `password` exactly match the configured pair.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if !self.inner.credentials.matches(email, password) {
            tracing::warn!(name: "auth.login.rejected", email = %email, "Invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session::new(email.to_string(), self.inner.reply.clone());
        self.write()
            .insert(session.token().to_string(), session.clone());

        tracing::info!(
            name: "auth.login.succeeded",
            email = %session.email(),
            "Session created"
        );
        Ok(session)
    }

    /// Look up a session by token.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<Session> {
        self.read().get(token).cloned()
    }

    /// Destroy the session for `token`, if any.
    ///
    /// Returns the removed session. Unknown tokens are not an error.
    pub fn logout(&self, token: &str) -> Option<Session> {
        let removed = self.write().remove(token);
        if let Some(session) = &removed {
            session.conversation().close();
            tracing::info!(
                name: "auth.logout",
                email = %session.email(),
                "Session destroyed"
            );
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Session>> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
