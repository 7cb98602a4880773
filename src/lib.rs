//! Campaign Brief Chat
//!
//! A demo marketing assistant: a mock login gate in front of a chat that
//! answers every prompt with a templated campaign brief after a short
//! artificial delay. Pages are rendered on the server; the same operations are
//! available as a small JSON API.
//!
//! # Architecture
//!
//! - **Server**: Axum router, static assets, request tracing
//! - **Session gate**: cookie-addressed server-side sessions
//! - **Conversation controller**: message list plus reply state machine
//! - **UI**: minijinja templates compiled into the binary
//!
//! # Modules
//!
//! - [`chat`]: conversation state and brief generation
//! - [`session`]: login, logout and the request gate
//! - [`routes`]: page and API handlers
//! - [`ui`]: page templates and view models
//! - [`notice`]: transient notifications

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod chat;
pub mod config;
pub mod error;
pub mod notice;
pub mod routes;
pub mod server;
pub mod session;
pub mod ui;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::chat::{BriefGenerator, CampaignBriefGenerator, ReplySettings};
use crate::config::AppConfig;
use crate::session::{Credentials, SessionStore};
use crate::ui::Pages;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Live sessions and the login/logout operations.
    pub sessions: SessionStore,
    /// Compiled page templates.
    pub pages: Arc<Pages>,
    /// Global configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state with the default campaign brief generator.
    pub fn new(config: Arc<AppConfig>) -> error::Result<Self> {
        let generator = Arc::new(CampaignBriefGenerator::with_seed(config.chat.seed));
        Self::with_generator(config, generator)
    }

    /// Build state around a specific reply generator.
    pub fn with_generator(
        config: Arc<AppConfig>,
        generator: Arc<dyn BriefGenerator>,
    ) -> error::Result<Self> {
        let sessions = SessionStore::new(
            Credentials {
                email: config.auth.email.clone(),
                password: config.auth.password.clone(),
            },
            ReplySettings {
                delay: config.chat.reply_delay(),
                generator,
            },
            std::time::Duration::from_secs(config.auth.redirect_delay_secs),
        );

        Ok(Self {
            sessions,
            pages: Arc::new(Pages::new()?),
            config,
        })
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
