//! Chat orchestrator: owns the transcript and drives message delivery.
//!
//! Delivery retries transient failures with a fixed backoff, renewing the
//! dialogue session between attempts. The session id in flight is threaded
//! explicitly through the retry loop; the cached id is only updated from
//! completed outcomes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use parley_core::config::ChatConfig;
use parley_core::types::ResponseBlock;
use parley_core::wire::DialogueRequest;
use parley_gateway::MessageChannel;

use crate::error::DeliveryError;
use crate::types::{ConversationMessage, DeliveryState};

#[derive(Default)]
struct ConversationState {
    messages: Vec<ConversationMessage>,
    session_id: Option<String>,
}

/// Central coordinator for one conversation.
pub struct ChatOrchestrator {
    channel: Arc<dyn MessageChannel>,
    config: ChatConfig,
    /// Locale of the person typing, forwarded on every turn.
    source_lang: String,
    state: Mutex<ConversationState>,
}

impl ChatOrchestrator {
    pub fn new(
        channel: Arc<dyn MessageChannel>,
        config: ChatConfig,
        source_lang: impl Into<String>,
    ) -> Self {
        Self {
            channel,
            config,
            source_lang: source_lang.into(),
            state: Mutex::new(ConversationState::default()),
        }
    }

    /// Establish a session and fetch the backend's opening turn.
    ///
    /// Returns `true` when a welcome reply landed in the transcript.
    pub async fn open_conversation(&self) -> bool {
        if self.establish_session().await.is_none() {
            return false;
        }

        // An empty utterance triggers the backend's greeting node.
        match self.deliver("").await {
            Ok(blocks) => {
                let mut state = self.lock_state();
                for block in blocks {
                    state.messages.push(ConversationMessage::assistant(block));
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "Opening turn failed");
                false
            }
        }
    }

    /// Append a user message and deliver it, retrying per the configured
    /// policy. Returns the transcript id of the new message; its final
    /// delivery state records the outcome.
    pub async fn submit(&self, text: impl Into<String>) -> Uuid {
        let message = ConversationMessage::user(text);
        let id = message.id;
        let text = message.text.clone();
        self.lock_state().messages.push(message);

        match self.deliver(&text).await {
            Ok(blocks) => {
                let mut state = self.lock_state();
                mark_delivery(&mut state.messages, id, DeliveryState::Delivered);
                for block in blocks {
                    state.messages.push(ConversationMessage::assistant(block));
                }
                info!(%id, "Message delivered");
            }
            Err(e) => {
                warn!(%id, error = %e, "Message delivery abandoned");
                mark_delivery(&mut self.lock_state().messages, id, DeliveryState::Failed);
            }
        }
        id
    }

    /// A snapshot of the transcript.
    pub fn messages(&self) -> Vec<ConversationMessage> {
        self.lock_state().messages.clone()
    }

    /// The currently cached session id, if any.
    pub fn session_id(&self) -> Option<String> {
        self.lock_state().session_id.clone()
    }

    /// The delivery loop: attempt 0 reuses the cached session id, each
    /// retry waits out the backoff and renews the session first.
    async fn deliver(&self, text: &str) -> Result<Vec<ResponseBlock>, DeliveryError> {
        let mut session_id = self.session_id();
        let mut last_failure = None;

        for attempt in 0..=self.config.max_attempt {
            if attempt > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.retry_backoff_ms)).await;
                session_id = self.establish_session().await;
            }

            let request = DialogueRequest::new(session_id.clone(), text, &self.source_lang);
            match self.channel.send(request).await {
                Ok(envelope) if envelope.is_success() => {
                    // The backend may have established a session implicitly;
                    // adopt whichever id it reports.
                    let adopted = envelope.session_id.clone().or(session_id);
                    self.lock_state().session_id = adopted;
                    debug!(attempt, "Dialogue turn succeeded");
                    return Ok(envelope
                        .result
                        .map(|r| r.output.generic)
                        .unwrap_or_default());
                }
                Ok(envelope) => {
                    warn!(status = envelope.status, attempt, "Dialogue turn refused");
                    last_failure = Some(if envelope.status == 404 {
                        DeliveryError::SessionExpired
                    } else {
                        DeliveryError::Transient(envelope.status)
                    });
                }
                Err(e) => {
                    let e = DeliveryError::from(e);
                    if !e.is_retryable() {
                        return Err(e);
                    }
                    warn!(error = %e, attempt, "Delivery attempt failed");
                    last_failure = Some(e);
                }
            }
        }

        Err(last_failure
            .unwrap_or_else(|| DeliveryError::Channel("no delivery attempt was made".to_string())))
    }

    /// Ask the backend for a fresh session, caching the outcome.
    ///
    /// On failure the cached id is cleared so the next turn lets the
    /// backend establish a session implicitly.
    async fn establish_session(&self) -> Option<String> {
        let session_id = match self.channel.create_session().await {
            Ok(envelope) if envelope.is_success() => envelope.result.map(|r| r.session_id),
            Ok(envelope) => {
                warn!(status = envelope.status, "Session create refused");
                None
            }
            Err(e) => {
                warn!(error = %e, "Session create failed");
                None
            }
        };
        self.lock_state().session_id = session_id.clone();
        session_id
    }

    fn lock_state(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn mark_delivery(messages: &mut [ConversationMessage], id: Uuid, delivery: DeliveryState) {
    if let Some(message) = messages.iter_mut().find(|m| m.id == id) {
        message.delivery = delivery;
    }
}
