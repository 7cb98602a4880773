//! Session gate.
//!
//! Replaces the browser-local "is authenticated" flag with an explicit
//! server-side [`Session`] created on login and destroyed on logout. Each
//! session owns its conversation.
//!
//! # Architecture
//!
//! - [`Session`]: the logged-in identifier plus its conversation
//! - [`SessionStore`]: thread-safe store, login/logout operations
//! - [`gate`]: cookie handling and the axum extractors that enforce the gate
//!
//! # Example
//!
//! ```rust,no_run
//! use std::{sync::Arc, time::Duration};
//! use campaign_brief_chat::chat::{CampaignBriefGenerator, ReplySettings};
//! use campaign_brief_chat::session::{Credentials, SessionStore};
//!
//! let store = SessionStore::new(
//!     Credentials { email: "demo@marketingai.com".into(), password: "demo123".into() },
//!     ReplySettings {
//!         delay: Duration::from_millis(1500),
//!         generator: Arc::new(CampaignBriefGenerator::new()),
//!     },
//!     Duration::from_secs(1),
//! );
//! let session = store.login("demo@marketingai.com", "demo123").unwrap();
//! assert!(store.get(session.token()).is_some());
//! store.logout(session.token());
//! assert!(store.is_empty());
//! ```

pub mod gate;
mod store;

pub use gate::{ApiSession, SESSION_COOKIE};
pub use store::{AuthError, Credentials, Session, SessionStore};
