//! The unified message gateway: inbound translate, dialogue call,
//! outbound remap, behind one channel trait.
//!
//! The chat orchestrator only ever talks to a `MessageChannel`; whether
//! that channel translates (a `MessageGateway`) or goes straight to the
//! dialogue backend is wiring, not policy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use parley_backend::{DialogueBackend, TranslationBackend};
use parley_core::wire::{DialogueEnvelope, DialogueRequest, SessionEnvelope};

use crate::error::GatewayError;
use crate::inbound::translate_inbound;
use crate::outbound::remap_outbound;

/// A route to the dialogue backend, translated or direct.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    async fn create_session(&self) -> Result<SessionEnvelope, GatewayError>;
    async fn send(&self, request: DialogueRequest) -> Result<DialogueEnvelope, GatewayError>;
}

/// Any bare dialogue backend is a channel that skips translation.
#[async_trait]
impl<T: DialogueBackend> MessageChannel for T {
    async fn create_session(&self) -> Result<SessionEnvelope, GatewayError> {
        Ok(DialogueBackend::create_session(self).await?)
    }

    async fn send(&self, request: DialogueRequest) -> Result<DialogueEnvelope, GatewayError> {
        Ok(self.send_message(&request).await?)
    }
}

/// Channel that wraps the dialogue backend with both translation halves.
pub struct MessageGateway {
    dialogue: Arc<dyn DialogueBackend>,
    translator: Arc<dyn TranslationBackend>,
    pivot_lang: String,
}

impl MessageGateway {
    pub fn new(
        dialogue: Arc<dyn DialogueBackend>,
        translator: Arc<dyn TranslationBackend>,
        pivot_lang: impl Into<String>,
    ) -> Self {
        Self {
            dialogue,
            translator,
            pivot_lang: pivot_lang.into(),
        }
    }
}

#[async_trait]
impl MessageChannel for MessageGateway {
    async fn create_session(&self) -> Result<SessionEnvelope, GatewayError> {
        Ok(self.dialogue.create_session().await?)
    }

    #[instrument(skip(self, request), fields(source_lang = %request.source_lang))]
    async fn send(&self, request: DialogueRequest) -> Result<DialogueEnvelope, GatewayError> {
        let source_lang = request.source_lang.clone();
        let request = translate_inbound(self.translator.as_ref(), request, &self.pivot_lang).await?;
        let mut envelope = self.dialogue.send_message(&request).await?;
        remap_outbound(
            self.translator.as_ref(),
            &mut envelope,
            &source_lang,
            &self.pivot_lang,
        )
        .await?;
        Ok(envelope)
    }
}
