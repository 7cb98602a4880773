//! JSON API mirroring the page flow.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::AppState;
use crate::chat::{Message, SubmitError};
use crate::notice::{Notice, NoticeView};
use crate::session::gate::{end_session, with_session_cookie, without_session_cookie};
use crate::session::{ApiSession, AuthError};

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub email: String,
}

/// Request body for a new message.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: Message,
}

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub email: String,
    pub logged_in_at: DateTime<Utc>,
    pub messages: Vec<Message>,
    pub pending: bool,
    pub pending_since: Option<DateTime<Utc>>,
    /// Notices raised since the previous read.
    pub notices: Vec<NoticeView>,
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::EmptyMessage => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ReplyPending => StatusCode::CONFLICT,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Response {
    match state.sessions.login(&req.email, &req.password) {
        Ok(session) => {
            end_session(&state.sessions, &jar);
            let body = LoginResponse {
                email: session.email().to_string(),
            };
            (with_session_cookie(jar, &session), Json(body)).into_response()
        }
        Err(err @ AuthError::InvalidCredentials) => {
            let notice = Notice::InvalidCredentials.view(&state.sessions.credentials().hint());
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": err.to_string(), "notice": notice })),
            )
                .into_response()
        }
    }
}

/// POST /api/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    end_session(&state.sessions, &jar);
    (without_session_cookie(jar), StatusCode::NO_CONTENT)
}

/// GET /api/conversation
pub async fn conversation(
    State(state): State<AppState>,
    ApiSession(session): ApiSession,
) -> Json<ConversationResponse> {
    let snapshot = session.conversation().snapshot();
    let hint = state.sessions.credentials().hint();

    Json(ConversationResponse {
        email: session.email().to_string(),
        logged_in_at: session.created_at(),
        messages: snapshot.messages,
        pending: snapshot.pending,
        pending_since: snapshot.pending_since,
        notices: snapshot
            .notices
            .into_iter()
            .map(|notice| notice.view(&hint))
            .collect(),
    })
}

/// POST /api/conversation/messages
pub async fn post_message(
    ApiSession(session): ApiSession,
    Json(req): Json<MessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), SubmitError> {
    let message = session.conversation().submit(&req.content)?;
    Ok((StatusCode::ACCEPTED, Json(MessageResponse { message })))
}
