//! Client for the batched translation backend.

use async_trait::async_trait;
use tracing::debug;

use parley_core::wire::{TranslationEnvelope, TranslationRequest};

use crate::dialogue::CLIENT_ID_HEADER;
use crate::error::BackendError;

/// The translation backend contract: an ordered batch in, an equally
/// ordered batch out. A non-success status or a count mismatch is a hard
/// failure; there is no retry at this level.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, BackendError>;
}

/// HTTP implementation of the translation contract.
pub struct HttpTranslationClient {
    http: reqwest::Client,
    endpoint_url: String,
    api_key: String,
}

impl HttpTranslationClient {
    pub fn new(endpoint_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint_url: endpoint_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TranslationBackend for HttpTranslationClient {
    async fn translate(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, BackendError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(count = texts.len(), source, target, "Translating batch");
        let body = TranslationRequest {
            text: texts.to_vec(),
            source: source.to_string(),
            target: target.to_string(),
        };
        let response = self
            .http
            .post(&self.endpoint_url)
            .header(CLIENT_ID_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;
        let raw = response.text().await?;
        let envelope: TranslationEnvelope =
            serde_json::from_str(&raw).map_err(|e| BackendError::Malformed(e.to_string()))?;

        if envelope.status != 200 {
            return Err(BackendError::Status(envelope.status));
        }
        let translations = envelope
            .result
            .ok_or_else(|| BackendError::Malformed("missing `result` in translation reply".to_string()))?
            .translations;
        if translations.len() != texts.len() {
            return Err(BackendError::TranslationCount {
                sent: texts.len(),
                received: translations.len(),
            });
        }
        Ok(translations.into_iter().map(|t| t.translation).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_batch_skips_network() {
        // An unroutable endpoint: the empty-input short circuit must return
        // before any request is attempted.
        let client = HttpTranslationClient::new("http://127.0.0.1:1", "key");
        let result = client.translate(&[], "fr", "en").await.unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_trait_is_object_safe() {
        fn assert_object(_: &dyn TranslationBackend) {}
        let client = HttpTranslationClient::new("http://127.0.0.1:1", "key");
        assert_object(&client);
    }
}
