//! Transient user notifications ("toasts").
//!
//! Notices raised during a redirect are carried to the next page in a
//! one-shot cookie holding the notice key.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

/// Cookie carrying a notice across one redirect.
pub const NOTICE_COOKIE: &str = "campaign_notice";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Every notification the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoginSucceeded,
    InvalidCredentials,
    LoggedOut,
    GenerationFailed,
}

impl Notice {
    /// Stable key used in the notice cookie and JSON payloads.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::LoginSucceeded => "login_succeeded",
            Self::InvalidCredentials => "invalid_credentials",
            Self::LoggedOut => "logged_out",
            Self::GenerationFailed => "generation_failed",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "login_succeeded" => Some(Self::LoginSucceeded),
            "invalid_credentials" => Some(Self::InvalidCredentials),
            "logged_out" => Some(Self::LoggedOut),
            "generation_failed" => Some(Self::GenerationFailed),
            _ => None,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::LoginSucceeded => "Login successful!",
            Self::InvalidCredentials => "Invalid credentials",
            Self::LoggedOut => "Logged out successfully",
            Self::GenerationFailed => "Error",
        }
    }

    #[must_use]
    pub fn variant(self) -> NoticeVariant {
        match self {
            Self::InvalidCredentials | Self::GenerationFailed => NoticeVariant::Destructive,
            Self::LoginSucceeded | Self::LoggedOut => NoticeVariant::Default,
        }
    }

    /// Render for display. `hint` fills in the demo credentials on rejection.
    #[must_use]
    pub fn view(self, hint: &str) -> NoticeView {
        let description = match self {
            Self::LoginSucceeded => "Welcome to Marketing AI Agent".to_string(),
            Self::InvalidCredentials => format!("Please use {hint}"),
            Self::LoggedOut => "See you next time!".to_string(),
            Self::GenerationFailed => {
                "Failed to generate campaign brief. Please try again.".to_string()
            }
        };
        NoticeView {
            key: self.key(),
            title: self.title(),
            description,
            variant: self.variant(),
        }
    }
}

/// A notice ready to be rendered or serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeView {
    pub key: &'static str,
    pub title: &'static str,
    pub description: String,
    pub variant: NoticeVariant,
}

/// Queue `notice` for the next rendered page.
#[must_use]
pub fn flash(jar: CookieJar, notice: Notice) -> CookieJar {
    jar.add(
        Cookie::build((NOTICE_COOKIE, notice.key()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .build(),
    )
}

/// Read and clear the flashed notice, if any.
#[must_use]
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(cookie) = jar.get(NOTICE_COOKIE) else {
        return (jar, None);
    };
    let notice = Notice::from_key(cookie.value());
    (jar.remove(Cookie::build(NOTICE_COOKIE).path("/")), notice)
}
