//! Input-history navigation over the transcript.
//!
//! The composer recalls previously sent utterances with up/down keys. Only
//! user messages participate; assistant turns are skipped.

use crate::types::{ConversationMessage, MessageOrigin};

/// Index of the nearest user message before `from`.
///
/// `from = None` starts from the end of the transcript (nothing recalled
/// yet). Returns `None` when there is no earlier user message.
pub fn earlier_user_message(
    messages: &[ConversationMessage],
    from: Option<usize>,
) -> Option<usize> {
    let end = from.unwrap_or(messages.len()).min(messages.len());
    messages[..end]
        .iter()
        .rposition(|m| m.origin == MessageOrigin::User)
}

/// Index of the nearest user message after `from`.
///
/// Returns `None` past the newest user message, which the composer treats
/// as "back to the empty draft".
pub fn later_user_message(messages: &[ConversationMessage], from: usize) -> Option<usize> {
    messages
        .iter()
        .enumerate()
        .skip(from + 1)
        .find(|(_, m)| m.origin == MessageOrigin::User)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConversationMessage;
    use parley_core::types::ResponseBlock;

    /// [U, A, U, A, U] at indices 0..5.
    fn transcript() -> Vec<ConversationMessage> {
        let reply = |text: &str| {
            ConversationMessage::assistant(ResponseBlock::Text {
                text: text.to_string(),
            })
        };
        vec![
            ConversationMessage::user("first"),
            reply("reply one"),
            ConversationMessage::user("second"),
            reply("reply two"),
            ConversationMessage::user("third"),
        ]
    }

    #[test]
    fn test_earlier_walks_user_messages_backwards() {
        let messages = transcript();
        assert_eq!(earlier_user_message(&messages, None), Some(4));
        assert_eq!(earlier_user_message(&messages, Some(4)), Some(2));
        assert_eq!(earlier_user_message(&messages, Some(2)), Some(0));
        assert_eq!(earlier_user_message(&messages, Some(0)), None);
    }

    #[test]
    fn test_earlier_skips_assistant_messages() {
        let messages = transcript();
        // From inside an assistant run, land on the user message before it.
        assert_eq!(earlier_user_message(&messages, Some(3)), Some(2));
    }

    #[test]
    fn test_later_walks_user_messages_forwards() {
        let messages = transcript();
        assert_eq!(later_user_message(&messages, 0), Some(2));
        assert_eq!(later_user_message(&messages, 2), Some(4));
        assert_eq!(later_user_message(&messages, 4), None);
    }

    #[test]
    fn test_empty_transcript_has_no_history() {
        let messages: Vec<ConversationMessage> = vec![];
        assert_eq!(earlier_user_message(&messages, None), None);
        assert_eq!(later_user_message(&messages, 0), None);
    }

    #[test]
    fn test_assistant_only_transcript_has_no_history() {
        let messages = vec![ConversationMessage::assistant(ResponseBlock::Text {
            text: "welcome".to_string(),
        })];
        assert_eq!(earlier_user_message(&messages, None), None);
        assert_eq!(later_user_message(&messages, 0), None);
    }

    #[test]
    fn test_out_of_range_cursor_is_clamped() {
        let messages = transcript();
        assert_eq!(earlier_user_message(&messages, Some(99)), Some(4));
    }
}
