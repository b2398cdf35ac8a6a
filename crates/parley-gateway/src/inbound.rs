//! Inbound half of the translation gateway.
//!
//! Runs before the dialogue call: the backend's NLU only ever sees the
//! pivot locale, so any other source locale is translated on the way in.
//! The request keeps its original `source_lang` tag so the outbound half
//! knows which locale to translate the reply back to.

use tracing::debug;

use parley_backend::TranslationBackend;
use parley_core::wire::DialogueRequest;

use crate::error::GatewayError;

/// Translate the user's utterance into the pivot locale, or pass the
/// request through untouched when the locales already match (or there is
/// nothing to translate, as on the welcome turn).
pub async fn translate_inbound(
    translator: &dyn TranslationBackend,
    mut request: DialogueRequest,
    pivot_lang: &str,
) -> Result<DialogueRequest, GatewayError> {
    if request.source_lang == pivot_lang || request.message.is_empty() {
        return Ok(request);
    }

    debug!(source = %request.source_lang, pivot = pivot_lang, "Translating inbound message");
    let batch = [request.message.clone()];
    let mut translated = translator
        .translate(&batch, &request.source_lang, pivot_lang)
        .await?;
    match translated.pop() {
        Some(message) => {
            request.message = message;
            Ok(request)
        }
        None => Err(GatewayError::FragmentMismatch {
            extracted: 1,
            translated: 0,
        }),
    }
}
