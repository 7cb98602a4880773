//! Server-rendered pages.
//!
//! Templates live in `templates/` and are compiled into the binary.
//!
//! # Structure
//!
//! - [`pages`]: template environment and render entry points
//! - [`views`]: serializable view models handed to templates

pub mod pages;
pub mod views;

pub use pages::Pages;
pub use views::{ChatPage, LoginPage, MessageView, RedirectView, SUGGESTIONS};
