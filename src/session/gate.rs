//! Request-side session gate.
//!
//! The session token lives in an `HttpOnly` cookie. [`Session`] is an axum
//! extractor: page handlers that take it are only reached with a live
//! session, everything else is redirected to the login page. [`ApiSession`]
//! does the same for JSON routes with a `401`.

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

use super::store::{Session, SessionStore};

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "campaign_session";

/// Where unauthenticated page visits are sent.
pub const LOGIN_PATH: &str = "/login";

/// Attach the session cookie for `session`.
#[must_use]
pub fn with_session_cookie(jar: CookieJar, session: &Session) -> CookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, session.token().to_string()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .build(),
    )
}

/// Expire the session cookie.
#[must_use]
pub fn without_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Resolve the session referenced by the request cookies.
#[must_use]
pub fn session_from_jar(store: &SessionStore, jar: &CookieJar) -> Option<Session> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| store.get(cookie.value()))
}

/// Destroy the session referenced by the request cookies, if any.
pub fn end_session(store: &SessionStore, jar: &CookieJar) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        store.logout(cookie.value());
    }
}

fn session_from_parts(parts: &Parts, store: &SessionStore) -> Option<Session> {
    session_from_jar(store, &CookieJar::from_headers(&parts.headers))
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = SessionStore::from_ref(state);
        session_from_parts(parts, &store).ok_or_else(|| {
            tracing::debug!(path = %parts.uri.path(), "No session, redirecting to login");
            Redirect::to(LOGIN_PATH)
        })
    }
}

/// Session extractor for JSON routes.
#[derive(Debug, Clone)]
pub struct ApiSession(pub Session);

/// Rejection for [`ApiSession`].
#[derive(Debug, Clone, Copy)]
pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "not logged in" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for ApiSession
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = Unauthorized;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = SessionStore::from_ref(state);
        session_from_parts(parts, &store)
            .map(ApiSession)
            .ok_or(Unauthorized)
    }
}
