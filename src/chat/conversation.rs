//! Conversation state and the reply state machine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::brief::{BriefGenerator, GenerationError};
use super::message::Message;
use crate::notice::Notice;

/// Assistant greeting every conversation opens with.
pub const GREETING: &str = "👋 Hello! I'm your Marketing AI Agent. I specialize in creating \
compelling campaign briefs that drive results. What marketing challenge can I help you solve today?";

/// Why a submission was not accepted. Rejection leaves the conversation untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("a reply is already pending")]
    ReplyPending,
}

/// Reply generation settings shared by every conversation.
#[derive(Debug, Clone)]
pub struct ReplySettings {
    /// Artificial latency before the reply is generated.
    pub delay: Duration,
    pub generator: Arc<dyn BriefGenerator>,
}

/// At most one reply is in flight per conversation.
#[derive(Debug, Default)]
enum ReplyState {
    #[default]
    Idle,
    Pending {
        task: JoinHandle<()>,
        since: DateTime<Utc>,
    },
}

/// Point-in-time view of a conversation for rendering.
#[derive(Debug, Clone)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub pending: bool,
    /// When the outstanding reply was requested.
    pub pending_since: Option<DateTime<Utc>>,
    /// Notices raised since the last snapshot. Draining them is what makes them transient.
    pub notices: Vec<Notice>,
}

/// Append-only chat conversation.
///
/// Cloning yields another handle to the same conversation.
#[derive(Debug, Clone)]
pub struct Conversation {
    inner: Arc<ConversationInner>,
}

#[derive(Debug)]
struct ConversationInner {
    settings: ReplySettings,
    state: Mutex<ConversationState>,
}

#[derive(Debug, Default)]
struct ConversationState {
    messages: Vec<Message>,
    reply: ReplyState,
    notices: Vec<Notice>,
}

impl Conversation {
    /// Start a conversation with the assistant greeting.
    #[must_use]
    pub fn new(settings: ReplySettings) -> Self {
        let state = ConversationState {
            messages: vec![Message::assistant(GREETING)],
            ..ConversationState::default()
        };
        Self {
            inner: Arc::new(ConversationInner {
                settings,
                state: Mutex::new(state),
            }),
        }
    }

    /// Append the user's message and schedule the assistant reply.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, text: &str) -> Result<Message, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyMessage);
        }

        let mut state = self.inner.lock();
        if matches!(state.reply, ReplyState::Pending { .. }) {
            return Err(SubmitError::ReplyPending);
        }

        let message = Message::user(text);
        state.messages.push(message.clone());

        let inner = Arc::clone(&self.inner);
        let prompt = text.to_string();
        let task = tokio::spawn(async move { inner.reply_to(prompt).await });
        state.reply = ReplyState::Pending {
            task,
            since: Utc::now(),
        };

        info!(
            name: "chat.message.submitted",
            message_id = %message.id(),
            message_count = state.messages.len(),
            "User message appended, reply pending"
        );
        Ok(message)
    }

    /// Whether an assistant reply is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.inner.lock().reply, ReplyState::Pending { .. })
    }

    /// All messages in creation order.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.inner.lock().messages.clone()
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.inner.lock().messages.len()
    }

    /// Messages plus reply state, draining queued notices.
    #[must_use]
    pub fn snapshot(&self) -> ConversationSnapshot {
        let mut state = self.inner.lock();
        let pending_since = match &state.reply {
            ReplyState::Pending { since, .. } => Some(*since),
            ReplyState::Idle => None,
        };
        ConversationSnapshot {
            messages: state.messages.clone(),
            pending: pending_since.is_some(),
            pending_since,
            notices: std::mem::take(&mut state.notices),
        }
    }

    /// Abort any in-flight reply. Used when the owning session is destroyed.
    pub fn close(&self) {
        let mut state = self.inner.lock();
        if let ReplyState::Pending { task, .. } = std::mem::take(&mut state.reply) {
            task.abort();
            info!(name: "chat.reply.aborted", "Pending reply aborted");
        }
    }
}

impl ConversationInner {
    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        // State is only mutated in whole steps, so a poisoned lock is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn reply_to(self: Arc<Self>, prompt: String) {
        tokio::time::sleep(self.settings.delay).await;

        let generator = Arc::clone(&self.settings.generator);
        let outcome = tokio::task::spawn_blocking(move || generator.generate(&prompt))
            .await
            .unwrap_or_else(|err| Err(GenerationError::Interrupted(err.to_string())));

        self.resolve(outcome);
    }

    fn resolve(&self, outcome: Result<String, GenerationError>) {
        let mut state = self.lock();
        match outcome {
            Ok(content) => {
                let message = Message::assistant(content);
                info!(
                    name: "chat.reply.resolved",
                    message_id = %message.id(),
                    "Assistant reply appended"
                );
                state.messages.push(message);
            }
            Err(err) => {
                warn!(name: "chat.reply.failed", error = %err, "Reply generation failed");
                state.notices.push(Notice::GenerationFailed);
            }
        }
        state.reply = ReplyState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::brief::{CAMPAIGN_TYPES, CampaignBriefGenerator, campaign_type_of};
    use crate::chat::message::Sender;

    const DELAY: Duration = Duration::from_millis(1500);

    #[derive(Debug)]
    struct FailingGenerator;

    impl BriefGenerator for FailingGenerator {
        fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::SourceUnavailable("test".to_string()))
        }
    }

    #[derive(Debug)]
    struct PanickingGenerator;

    impl BriefGenerator for PanickingGenerator {
        fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            panic!("generator blew up");
        }
    }

    fn conversation_with(generator: Arc<dyn BriefGenerator>) -> Conversation {
        Conversation::new(ReplySettings {
            delay: DELAY,
            generator,
        })
    }

    fn conversation() -> Conversation {
        conversation_with(Arc::new(CampaignBriefGenerator::seeded(3)))
    }

    async fn wait_for_reply() {
        tokio::time::sleep(DELAY + Duration::from_millis(100)).await;
        // let the blocking generation finish and report back
        for _ in 0..50 {
            tokio::task::yield_now().await;
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    #[tokio::test]
    async fn test_starts_with_greeting() {
        let conversation = conversation();
        let messages = conversation.messages();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender(), Sender::Assistant);
        assert_eq!(messages[0].content(), GREETING);
        assert!(!conversation.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_then_reply() {
        let conversation = conversation();

        let sent = conversation.submit("Product launch strategy").unwrap();
        assert_eq!(sent.content(), "Product launch strategy");
        assert_eq!(conversation.message_count(), 2);
        assert!(conversation.is_pending());
        assert!(conversation.snapshot().pending_since.is_some());

        wait_for_reply().await;

        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender(), Sender::User);
        assert_eq!(messages[2].sender(), Sender::Assistant);

        let reply = messages[2].content();
        let label = campaign_type_of(reply).unwrap();
        assert!(CAMPAIGN_TYPES.contains(&label));
        let objective = reply.split("**Target Audience:**").next().unwrap();
        assert!(objective.contains("Product launch strategy"));
        assert!(!conversation.is_pending());
        assert_eq!(conversation.snapshot().pending_since, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_not_before_delay() {
        let conversation = conversation();
        conversation.submit("Brand awareness").unwrap();

        tokio::time::sleep(DELAY - Duration::from_millis(100)).await;
        assert_eq!(conversation.message_count(), 2);
        assert!(conversation.is_pending());
    }

    #[tokio::test]
    async fn test_blank_submit_is_rejected() {
        let conversation = conversation();

        for text in ["", "   ", "\n\t "] {
            assert_eq!(conversation.submit(text), Err(SubmitError::EmptyMessage));
        }
        assert_eq!(conversation.message_count(), 1);
        assert!(!conversation.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_rejected_while_pending() {
        let conversation = conversation();
        conversation.submit("Email marketing").unwrap();

        assert_eq!(
            conversation.submit("Social media campaign"),
            Err(SubmitError::ReplyPending)
        );
        assert_eq!(conversation.message_count(), 2);

        wait_for_reply().await;
        assert_eq!(conversation.message_count(), 3);

        conversation.submit("Social media campaign").unwrap();
        assert_eq!(conversation.message_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_failure_surfaces_notice() {
        let conversation = conversation_with(Arc::new(FailingGenerator));
        conversation.submit("Brand awareness").unwrap();

        wait_for_reply().await;

        let snapshot = conversation.snapshot();
        assert_eq!(snapshot.messages.len(), 2);
        assert!(!snapshot.pending);
        assert_eq!(snapshot.notices, vec![Notice::GenerationFailed]);

        // drained
        assert!(conversation.snapshot().notices.is_empty());
        assert!(conversation.submit("again").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_generator_panic_clears_pending() {
        let conversation = conversation_with(Arc::new(PanickingGenerator));
        conversation.submit("Brand awareness").unwrap();

        wait_for_reply().await;

        let snapshot = conversation.snapshot();
        assert!(!snapshot.pending);
        assert_eq!(snapshot.notices, vec![Notice::GenerationFailed]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_aborts_pending_reply() {
        let conversation = conversation();
        conversation.submit("Product launch strategy").unwrap();

        conversation.close();
        assert!(!conversation.is_pending());

        wait_for_reply().await;
        assert_eq!(conversation.message_count(), 2);
    }
}
