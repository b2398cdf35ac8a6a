//! Transcript message types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use parley_core::types::ResponseBlock;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    User,
    Assistant,
}

/// Delivery lifecycle of a user message.
///
/// Assistant messages are only ever appended after a successful turn, so
/// they are born `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    Sending,
    Delivered,
    Failed,
}

/// One entry of the conversation transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub origin: MessageOrigin,
    /// Display text: the utterance for user messages, the block's primary
    /// text for assistant messages.
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub delivery: DeliveryState,
    /// The structured block behind an assistant message. `None` for user
    /// messages.
    pub block: Option<ResponseBlock>,
}

impl ConversationMessage {
    /// A pending user utterance, not yet delivered.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin: MessageOrigin::User,
            text: text.into(),
            created_at: Utc::now(),
            delivery: DeliveryState::Sending,
            block: None,
        }
    }

    /// An assistant reply wrapping one response block.
    pub fn assistant(block: ResponseBlock) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin: MessageOrigin::Assistant,
            text: block.display_text().to_string(),
            created_at: Utc::now(),
            delivery: DeliveryState::Delivered,
            block: Some(block),
        }
    }
}
