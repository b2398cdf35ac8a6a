//! Outbound half of the translation gateway.
//!
//! Runs after a successful dialogue call: extracts every translatable
//! fragment from the reply blocks, issues exactly one batched translation
//! call (pivot locale to the user's locale), and splices the results back
//! into their original positions. A translation failure aborts the whole
//! remap; no partially translated reply is ever returned.

use tracing::debug;

use parley_backend::TranslationBackend;
use parley_core::wire::DialogueEnvelope;

use crate::error::GatewayError;
use crate::fragment::{extract_fragments, SpliceCursor};

/// Remap a dialogue reply into the user's locale in place.
///
/// No-ops when the reply is not a success, carries no blocks, the locales
/// already match, or nothing in the blocks is translatable.
pub async fn remap_outbound(
    translator: &dyn TranslationBackend,
    envelope: &mut DialogueEnvelope,
    source_lang: &str,
    pivot_lang: &str,
) -> Result<(), GatewayError> {
    if !envelope.is_success() || source_lang == pivot_lang {
        return Ok(());
    }
    let Some(result) = envelope.result.as_mut() else {
        return Ok(());
    };
    let blocks = &mut result.output.generic;
    if blocks.is_empty() {
        return Ok(());
    }

    let fragments = extract_fragments(blocks);
    if fragments.is_empty() {
        return Ok(());
    }

    debug!(
        fragments = fragments.len(),
        blocks = blocks.len(),
        source = source_lang,
        pivot = pivot_lang,
        "Remapping outbound reply"
    );
    let texts: Vec<String> = fragments.iter().map(|f| f.text.clone()).collect();
    let translations = translator.translate(&texts, pivot_lang, source_lang).await?;
    SpliceCursor::new(fragments, translations)?.apply(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parley_backend::BackendError;
    use parley_core::types::{ResponseBlock, SuggestionItem};
    use parley_core::wire::{DialogueOutput, DialogueResult};
    use std::sync::Mutex;

    struct ScriptedTranslator {
        replies: Mutex<Vec<Result<Vec<String>, BackendError>>>,
        calls: Mutex<usize>,
    }

    impl ScriptedTranslator {
        fn new(replies: Vec<Result<Vec<String>, BackendError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl TranslationBackend for ScriptedTranslator {
        async fn translate(
            &self,
            _texts: &[String],
            _source: &str,
            _target: &str,
        ) -> Result<Vec<String>, BackendError> {
            *self.calls.lock().unwrap() += 1;
            self.replies.lock().unwrap().remove(0)
        }
    }

    fn envelope_with(blocks: Vec<ResponseBlock>) -> DialogueEnvelope {
        DialogueEnvelope {
            status: 200,
            session_id: Some("s1".to_string()),
            result: Some(DialogueResult {
                context: None,
                output: DialogueOutput { generic: blocks },
            }),
        }
    }

    fn text(s: &str) -> ResponseBlock {
        ResponseBlock::Text {
            text: s.to_string(),
        }
    }

    fn suggestion(title: &str, labels: &[&str]) -> ResponseBlock {
        ResponseBlock::Suggestion {
            title: title.to_string(),
            suggestions: labels
                .iter()
                .map(|l| SuggestionItem {
                    label: l.to_string(),
                    value: None,
                    output: None,
                })
                .collect(),
        }
    }

    // ---- Pass-through cases ----

    #[tokio::test]
    async fn test_same_locale_is_untouched() {
        let translator = ScriptedTranslator::new(vec![]);
        let mut envelope = envelope_with(vec![text("hello")]);
        let before = envelope.clone();
        remap_outbound(&translator, &mut envelope, "en", "en")
            .await
            .unwrap();
        assert_eq!(envelope, before);
        assert_eq!(translator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_envelope_is_untouched() {
        let translator = ScriptedTranslator::new(vec![]);
        let mut envelope = DialogueEnvelope {
            status: 500,
            session_id: None,
            result: None,
        };
        remap_outbound(&translator, &mut envelope, "fr", "en")
            .await
            .unwrap();
        assert_eq!(translator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_block_list_is_untouched() {
        let translator = ScriptedTranslator::new(vec![]);
        let mut envelope = envelope_with(vec![]);
        remap_outbound(&translator, &mut envelope, "fr", "en")
            .await
            .unwrap();
        assert_eq!(translator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_all_link_blocks_skip_the_translation_call() {
        let translator = ScriptedTranslator::new(vec![]);
        let mut envelope = envelope_with(vec![text("https://example.org"), text("<a href=\"x\">x</a>")]);
        let before = envelope.clone();
        remap_outbound(&translator, &mut envelope, "fr", "en")
            .await
            .unwrap();
        assert_eq!(envelope, before);
        assert_eq!(translator.call_count(), 0);
    }

    // ---- Remapping ----

    #[tokio::test]
    async fn test_remap_splices_in_extraction_order() {
        let translator = ScriptedTranslator::new(vec![Ok(vec![
            "salut".to_string(),
            "choisir".to_string(),
            "x".to_string(),
            "y".to_string(),
        ])]);
        let mut envelope = envelope_with(vec![text("hello"), suggestion("pick", &["a", "b"])]);
        remap_outbound(&translator, &mut envelope, "fr", "en")
            .await
            .unwrap();

        let blocks = envelope.result.unwrap().output.generic;
        assert_eq!(blocks[0], text("salut"));
        assert_eq!(blocks[1], suggestion("choisir", &["x", "y"]));
        assert_eq!(translator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_session_and_status_survive_remap() {
        let translator = ScriptedTranslator::new(vec![Ok(vec!["salut".to_string()])]);
        let mut envelope = envelope_with(vec![text("hello")]);
        remap_outbound(&translator, &mut envelope, "fr", "en")
            .await
            .unwrap();
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.session_id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn test_translator_failure_aborts_remap() {
        let translator = ScriptedTranslator::new(vec![Err(BackendError::Status(503))]);
        let mut envelope = envelope_with(vec![text("hello")]);
        let err = remap_outbound(&translator, &mut envelope, "fr", "en")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Backend(BackendError::Status(503))
        ));
        // Nothing was spliced.
        assert_eq!(envelope.result.unwrap().output.generic[0], text("hello"));
    }

    #[tokio::test]
    async fn test_short_translation_batch_fails_loudly() {
        let translator = ScriptedTranslator::new(vec![Ok(vec!["salut".to_string()])]);
        let mut envelope = envelope_with(vec![text("hello"), text("world")]);
        let err = remap_outbound(&translator, &mut envelope, "fr", "en")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::FragmentMismatch {
                extracted: 2,
                translated: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_search_block_survives_remap_untouched() {
        use parley_core::types::SearchHit;

        let translator = ScriptedTranslator::new(vec![Ok(vec!["salut".to_string()])]);
        let search = ResponseBlock::Search {
            header: "found".to_string(),
            results: vec![SearchHit {
                title: "doc".to_string(),
                highlight: Some("passage".to_string()),
                url: Some("https://x.org/doc".to_string()),
                body: None,
            }],
        };
        let mut envelope = envelope_with(vec![text("hello"), search.clone()]);
        remap_outbound(&translator, &mut envelope, "fr", "en")
            .await
            .unwrap();

        let blocks = envelope.result.unwrap().output.generic;
        assert_eq!(blocks[0], text("salut"));
        assert_eq!(blocks[1], search);
    }
}
