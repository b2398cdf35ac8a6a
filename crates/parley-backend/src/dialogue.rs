//! Client for the session-oriented dialogue backend.
//!
//! Two operations: create a session and send one utterance. Both return
//! envelope types with the status embedded in the body; interpreting the
//! status is the caller's concern so that the retry policy stays in one
//! place (the chat orchestrator).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use parley_core::wire::{DialogueEnvelope, DialogueRequest, SessionEnvelope};

use crate::error::BackendError;

/// Header carrying the API key on every backend call.
pub const CLIENT_ID_HEADER: &str = "X-Client-Id";

/// The dialogue backend contract.
#[async_trait]
pub trait DialogueBackend: Send + Sync {
    /// Establish a fresh session. Success is `status == 201` in the envelope.
    async fn create_session(&self) -> Result<SessionEnvelope, BackendError>;

    /// Deliver one user utterance. Success is `status == 200` in the
    /// envelope; any other value calls for a fresh session before retrying.
    async fn send_message(&self, request: &DialogueRequest)
        -> Result<DialogueEnvelope, BackendError>;
}

/// HTTP implementation talking to the deployed gateway functions.
pub struct HttpDialogueClient {
    http: reqwest::Client,
    session_url: String,
    message_url: String,
    api_key: String,
}

impl HttpDialogueClient {
    pub fn new(endpoint_url: &str, api_key: impl Into<String>) -> Self {
        let base = endpoint_url.trim_end_matches('/');
        Self {
            http: reqwest::Client::new(),
            session_url: format!("{}/session", base),
            message_url: format!("{}/message", base),
            api_key: api_key.into(),
        }
    }
}

/// POST a JSON body and decode the reply, reporting shape problems as
/// `Malformed` rather than a bare transport error.
async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    api_key: &str,
    body: Option<&B>,
) -> Result<T, BackendError> {
    let mut request = http.post(url).header(CLIENT_ID_HEADER, api_key);
    if let Some(body) = body {
        request = request.json(body);
    }
    let response = request.send().await?;
    let raw = response.text().await?;
    serde_json::from_str(&raw).map_err(|e| BackendError::Malformed(e.to_string()))
}

#[async_trait]
impl DialogueBackend for HttpDialogueClient {
    async fn create_session(&self) -> Result<SessionEnvelope, BackendError> {
        debug!(url = %self.session_url, "Creating dialogue session");
        post_json::<(), _>(&self.http, &self.session_url, &self.api_key, None).await
    }

    async fn send_message(
        &self,
        request: &DialogueRequest,
    ) -> Result<DialogueEnvelope, BackendError> {
        debug!(
            url = %self.message_url,
            session = request.session_id.as_deref().unwrap_or("<none>"),
            "Sending dialogue message"
        );
        post_json(&self.http, &self.message_url, &self.api_key, Some(request)).await
    }
}
