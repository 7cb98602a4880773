//! Template view models.

use chrono::Local;
use serde::Serialize;

use crate::chat::Message;
use crate::notice::NoticeView;

/// Shortcuts offered under the chat input.
pub const SUGGESTIONS: [&str; 4] = [
    "Product launch strategy",
    "Social media campaign",
    "Email marketing",
    "Brand awareness",
];

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub id: String,
    pub sender: &'static str,
    pub content: String,
    /// Wall-clock time in the server's local zone.
    pub time: String,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id().to_string(),
            sender: message.sender().as_str(),
            content: message.content().to_string(),
            time: message
                .timestamp()
                .with_timezone(&Local)
                .format("%-I:%M:%S %p")
                .to_string(),
        }
    }
}

/// Client-side navigation after a pause.
#[derive(Debug, Clone, Serialize)]
pub struct RedirectView {
    pub url: &'static str,
    pub delay_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPage {
    /// Previously entered email, kept across a rejected attempt.
    pub email: String,
    pub hint_email: String,
    pub hint_password: String,
    pub notices: Vec<NoticeView>,
    /// Set after a successful login.
    pub redirect: Option<RedirectView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatPage {
    pub email: String,
    pub messages: Vec<MessageView>,
    pub pending: bool,
    /// Pre-filled input text.
    pub draft: String,
    pub suggestions: &'static [&'static str],
    pub notices: Vec<NoticeView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_view_copies_fields() {
        let message = Message::user("Brand awareness");
        let view = MessageView::from(&message);

        assert_eq!(view.sender, "user");
        assert_eq!(view.content, "Brand awareness");
        assert_eq!(view.id, message.id().to_string());
        assert!(view.time.ends_with("AM") || view.time.ends_with("PM"));
    }
}
