//! Conversation controller.
//!
//! A [`Conversation`] holds the ordered message list and the reply state
//! machine. Submitting a message appends it immediately and spawns a single
//! reply task which, after an artificial delay, asks a [`BriefGenerator`] for
//! the assistant's campaign brief.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use campaign_brief_chat::chat::{CampaignBriefGenerator, Conversation, ReplySettings};
//!
//! # #[tokio::main] async fn main() {
//! let conversation = Conversation::new(ReplySettings {
//!     delay: Duration::from_millis(1500),
//!     generator: Arc::new(CampaignBriefGenerator::new()),
//! });
//! conversation.submit("Product launch strategy").unwrap();
//! assert!(conversation.is_pending());
//! # }
//! ```

mod brief;
mod conversation;
mod message;

pub use brief::{
    BriefGenerator, CAMPAIGN_TYPES, CampaignBriefGenerator, GenerationError, campaign_type_of,
    generate_reply, render_brief,
};
pub use conversation::{Conversation, ConversationSnapshot, GREETING, ReplySettings, SubmitError};
pub use message::{Message, Sender};
