//! Wire envelopes for the dialogue, session, and translation contracts.
//!
//! All three backends embed an HTTP-style `status` code in the response body
//! rather than relying on the transport status; the client treats `200`
//! (dialogue, translation) and `201` (session create) as success and
//! everything else as a failure. Field casing follows each endpoint's
//! published shape: the dialogue message endpoint speaks camelCase, the
//! session and translation endpoints snake_case.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ResponseBlock;

/// Body of `POST /message`: one user utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueRequest {
    /// Omitted on the first turn; the backend then establishes a session
    /// implicitly and reports its id in the reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub message: String,
    pub source_lang: String,
    /// Conversation context echoed between turns, opaque to Parley.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl DialogueRequest {
    pub fn new(session_id: Option<String>, message: impl Into<String>, source_lang: impl Into<String>) -> Self {
        Self {
            session_id,
            message: message.into(),
            source_lang: source_lang.into(),
            context: None,
        }
    }
}

/// Reply envelope of the dialogue message endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueEnvelope {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DialogueResult>,
}

impl DialogueEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    pub output: DialogueOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueOutput {
    pub generic: Vec<ResponseBlock>,
}

/// Reply envelope of the session-create endpoint. `201` signals success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEnvelope {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SessionResult>,
}

impl SessionEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == 201
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub session_id: String,
}

/// Body of the batched translation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: Vec<String>,
    pub source: String,
    pub target: String,
}

/// Reply envelope of the translation endpoint. Translations come back in
/// the same order as the request's `text` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationEnvelope {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TranslationResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translations: Vec<TranslationItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationItem {
    pub translation: String,
}
