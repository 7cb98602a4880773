//! Login and logout pages.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::AppState;
use crate::error::Result;
use crate::notice::{Notice, flash, take_flash};
use crate::session::gate::{
    LOGIN_PATH, end_session, session_from_jar, with_session_cookie, without_session_cookie,
};
use crate::session::AuthError;
use crate::ui::{LoginPage, RedirectView};

use super::CHAT_PATH;

/// Login form fields. Missing fields count as empty.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn login_view(
    state: &AppState,
    email: String,
    notices: &[Notice],
    redirect: Option<RedirectView>,
) -> LoginPage {
    let credentials = state.sessions.credentials();
    let hint = credentials.hint();
    LoginPage {
        email,
        hint_email: credentials.email.clone(),
        hint_password: credentials.password.clone(),
        notices: notices.iter().map(|notice| notice.view(&hint)).collect(),
        redirect,
    }
}

/// GET /login - Show the login form.
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> Result<Response> {
    if session_from_jar(&state.sessions, &jar).is_some() {
        return Ok(Redirect::to(CHAT_PATH).into_response());
    }

    let (jar, flashed) = take_flash(jar);
    let notices: Vec<Notice> = flashed.into_iter().collect();
    let html = state
        .pages
        .login(&login_view(&state, String::new(), &notices, None))?;
    Ok((jar, Html(html)).into_response())
}

/// POST /login - Check credentials and open a session.
///
/// Success answers with a confirmation page that moves on to the chat after
/// the configured delay. Rejection re-renders the form with the email kept.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state.sessions.login(&form.email, &form.password) {
        Ok(session) => {
            // a client holds one session at a time
            end_session(&state.sessions, &jar);
            let redirect = RedirectView {
                url: CHAT_PATH,
                delay_secs: state.sessions.redirect_delay().as_secs(),
            };
            let page = login_view(&state, form.email, &[Notice::LoginSucceeded], Some(redirect));
            let html = state.pages.login(&page)?;
            Ok((with_session_cookie(jar, &session), Html(html)).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            let page = login_view(&state, form.email, &[Notice::InvalidCredentials], None);
            let html = state.pages.login(&page)?;
            Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response())
        }
    }
}

/// POST /logout - Destroy the session, whatever state it is in.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    end_session(&state.sessions, &jar);
    let jar = flash(without_session_cookie(jar), Notice::LoggedOut);
    (jar, Redirect::to(LOGIN_PATH))
}
