//! Chat page handlers.

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::debug;

use crate::AppState;
use crate::error::Result;
use crate::notice::take_flash;
use crate::session::Session;
use crate::ui::{ChatPage, MessageView, SUGGESTIONS};

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    /// Text to pre-fill the input with (suggestion shortcuts).
    #[serde(default)]
    pub draft: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub message: String,
}

/// GET /chat - Render the conversation.
///
/// While a reply is pending the page refreshes itself and the input is
/// disabled.
pub async fn chat_page(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(query): Query<ChatQuery>,
) -> Result<Response> {
    let snapshot = session.conversation().snapshot();
    let (jar, flashed) = take_flash(jar);
    let hint = state.sessions.credentials().hint();

    let page = ChatPage {
        email: session.email().to_string(),
        messages: snapshot.messages.iter().map(MessageView::from).collect(),
        pending: snapshot.pending,
        draft: if snapshot.pending {
            String::new()
        } else {
            query.draft
        },
        suggestions: &SUGGESTIONS,
        notices: flashed
            .into_iter()
            .chain(snapshot.notices)
            .map(|notice| notice.view(&hint))
            .collect(),
    };

    Ok((jar, Html(state.pages.chat(&page)?)).into_response())
}

/// POST /chat - Submit a message and return to the conversation.
///
/// Rejected submissions (blank text, reply pending) change nothing.
pub async fn chat_submit(session: Session, Form(form): Form<MessageForm>) -> Redirect {
    if let Err(err) = session.conversation().submit(&form.message) {
        debug!(email = %session.email(), reason = %err, "Submission ignored");
    }
    Redirect::to("/chat#latest")
}
