//! Structured response blocks produced by the dialogue backend.
//!
//! The backend tags each block with a `response_type` discriminator on the
//! wire. Modelling the full set as a closed enum means every consumer has to
//! handle new block kinds explicitly; the translation remapper in particular
//! relies on exhaustive matching so that a non-translatable block is a
//! deliberate pass-through rather than a silent default branch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a suggestion list.
///
/// `value` and `output` carry the backend's dispatch payload (intents,
/// canned input, propensity scores). They are opaque to Parley and must
/// survive the translation remap byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
}

/// One entry of an option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// One document hit inside a search block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A single block of a dialogue reply, tagged by `response_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "response_type", rename_all = "snake_case")]
pub enum ResponseBlock {
    /// Plain text (possibly a bare link or anchor tag).
    Text { text: String },
    /// Disambiguation prompt with clickable suggestion labels.
    Suggestion {
        title: String,
        suggestions: Vec<SuggestionItem>,
    },
    /// Option picker with clickable labels.
    Option {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        preference: Option<String>,
        options: Vec<OptionItem>,
    },
    /// Document search results with a header line.
    Search {
        header: String,
        results: Vec<SearchHit>,
    },
    /// Typing-indicator pause, milliseconds.
    Pause {
        time: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        typing: Option<bool>,
    },
    /// Inline image reference.
    Image {
        source: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Hand-off to a human agent.
    ConnectToAgent {
        #[serde(skip_serializing_if = "Option::is_none")]
        message_to_human_agent: Option<String>,
    },
}

impl ResponseBlock {
    /// The primary display text of this block, used by the presentation
    /// layer for the chat transcript line.
    pub fn display_text(&self) -> &str {
        match self {
            ResponseBlock::Text { text } => text,
            ResponseBlock::Suggestion { title, .. } => title,
            ResponseBlock::Option { title, .. } => title,
            ResponseBlock::Search { header, .. } => header,
            ResponseBlock::Image { source, title, .. } => title.as_deref().unwrap_or(source),
            ResponseBlock::ConnectToAgent {
                message_to_human_agent,
            } => message_to_human_agent.as_deref().unwrap_or(""),
            ResponseBlock::Pause { .. } => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Tagged deserialization ----

    #[test]
    fn test_text_block_round_trip() {
        let json = r#"{"response_type":"text","text":"hello"}"#;
        let block: ResponseBlock = serde_json::from_str(json).unwrap();
        assert_eq!(
            block,
            ResponseBlock::Text {
                text: "hello".to_string()
            }
        );
        let back = serde_json::to_string(&block).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn test_suggestion_block_deserializes() {
        let json = r#"{
            "response_type": "suggestion",
            "title": "Did you mean:",
            "suggestions": [
                {"label": "open hours", "value": {"input": {"text": "open hours"}}},
                {"label": "locations"}
            ]
        }"#;
        let block: ResponseBlock = serde_json::from_str(json).unwrap();
        match block {
            ResponseBlock::Suggestion { title, suggestions } => {
                assert_eq!(title, "Did you mean:");
                assert_eq!(suggestions.len(), 2);
                assert_eq!(suggestions[0].label, "open hours");
                assert!(suggestions[0].value.is_some());
                assert!(suggestions[1].value.is_none());
            }
            other => panic!("expected suggestion block, got {:?}", other),
        }
    }

    #[test]
    fn test_option_block_deserializes() {
        let json = r#"{
            "response_type": "option",
            "title": "Pick one",
            "preference": "button",
            "options": [{"label": "a"}, {"label": "b"}]
        }"#;
        let block: ResponseBlock = serde_json::from_str(json).unwrap();
        match block {
            ResponseBlock::Option {
                title,
                preference,
                options,
            } => {
                assert_eq!(title, "Pick one");
                assert_eq!(preference.as_deref(), Some("button"));
                assert_eq!(options.len(), 2);
            }
            other => panic!("expected option block, got {:?}", other),
        }
    }

    #[test]
    fn test_search_block_keeps_urls() {
        let json = r#"{
            "response_type": "search",
            "header": "I found this:",
            "results": [
                {"title": "FAQ", "highlight": "relevant passage", "url": "https://example.org/faq"}
            ]
        }"#;
        let block: ResponseBlock = serde_json::from_str(json).unwrap();
        match &block {
            ResponseBlock::Search { results, .. } => {
                assert_eq!(results[0].url.as_deref(), Some("https://example.org/faq"));
            }
            other => panic!("expected search block, got {:?}", other),
        }
    }

    #[test]
    fn test_pause_and_connect_to_agent_tags() {
        let pause: ResponseBlock =
            serde_json::from_str(r#"{"response_type":"pause","time":500,"typing":true}"#).unwrap();
        assert!(matches!(pause, ResponseBlock::Pause { time: 500, .. }));

        let agent: ResponseBlock =
            serde_json::from_str(r#"{"response_type":"connect_to_agent"}"#).unwrap();
        assert!(matches!(agent, ResponseBlock::ConnectToAgent { .. }));
    }

    #[test]
    fn test_unknown_response_type_is_rejected() {
        let result: std::result::Result<ResponseBlock, _> =
            serde_json::from_str(r#"{"response_type":"hologram","text":"hi"}"#);
        assert!(result.is_err());
    }

    // ---- Display text ----

    #[test]
    fn test_display_text_per_variant() {
        let text = ResponseBlock::Text {
            text: "hi".to_string(),
        };
        assert_eq!(text.display_text(), "hi");

        let suggestion = ResponseBlock::Suggestion {
            title: "choose".to_string(),
            suggestions: vec![],
        };
        assert_eq!(suggestion.display_text(), "choose");

        let search = ResponseBlock::Search {
            header: "found".to_string(),
            results: vec![],
        };
        assert_eq!(search.display_text(), "found");

        let pause = ResponseBlock::Pause {
            time: 100,
            typing: None,
        };
        assert_eq!(pause.display_text(), "");
    }

    #[test]
    fn test_opaque_payload_survives_round_trip() {
        let json = r#"{"response_type":"suggestion","title":"t","suggestions":[{"label":"l","value":{"input":{"intents":[{"intent":"greet","confidence":0.9}]}}}]}"#;
        let block: ResponseBlock = serde_json::from_str(json).unwrap();
        let back: ResponseBlock = serde_json::from_str(&serde_json::to_string(&block).unwrap()).unwrap();
        assert_eq!(block, back);
    }
}
