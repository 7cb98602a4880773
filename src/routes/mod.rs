//! HTTP handlers.
//!
//! - [`auth`]: login and logout pages
//! - [`chat`]: conversation page and form submission
//! - [`api`]: JSON equivalents of both

pub mod api;
pub mod auth;
pub mod chat;

use axum::response::Redirect;

/// The gated conversation page.
pub const CHAT_PATH: &str = "/chat";

/// GET / - Everything starts at the chat; the gate sends strangers to login.
pub async fn index() -> Redirect {
    Redirect::to(CHAT_PATH)
}
