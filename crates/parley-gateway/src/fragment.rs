//! Fragment extraction and splice-back for the outbound remap.
//!
//! A reply is a heterogeneous block list; only some strings in it are
//! user-facing prose. Extraction records each translatable string with the
//! `(block, sub)` coordinate it came from; after the batched translation
//! call, a `SpliceCursor` walks the same block list once and writes every
//! translated string back to its recorded coordinate. The two passes share
//! the fragment list, so a count mismatch or a coordinate that no longer
//! fits the block shape is a hard error, never a silent misplacement.

use parley_core::types::ResponseBlock;

use crate::error::GatewayError;

/// One translatable string tagged with its position in the block list.
///
/// `sub == 0` is the block's own text or title; `sub > 0` is the
/// `(sub - 1)`-th item label of a suggestion/option list.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub block: usize,
    pub sub: usize,
    pub text: String,
}

/// Whether a text block carries a link payload rather than prose.
///
/// Link-bearing messages are excluded from translation so URLs and anchor
/// markup reach the client intact.
// TODO: this prefix check misses uppercase schemes ("HTTP://...") and
// messages where the anchor tag is not the first token. Tighten once the
// dialogue skill's link-formatting convention is settled.
pub fn is_link_like(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with("<a ") || trimmed.starts_with("http")
}

/// Walk the block list once and collect every translatable fragment in
/// order. Pass-through variants (search, pause, image, agent hand-off)
/// contribute nothing; the exhaustive match keeps that choice visible.
pub fn extract_fragments(blocks: &[ResponseBlock]) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        match block {
            ResponseBlock::Text { text } => {
                if !is_link_like(text) {
                    fragments.push(Fragment {
                        block: index,
                        sub: 0,
                        text: text.clone(),
                    });
                }
            }
            ResponseBlock::Suggestion { title, suggestions } => {
                fragments.push(Fragment {
                    block: index,
                    sub: 0,
                    text: title.clone(),
                });
                for (i, item) in suggestions.iter().enumerate() {
                    fragments.push(Fragment {
                        block: index,
                        sub: i + 1,
                        text: item.label.clone(),
                    });
                }
            }
            ResponseBlock::Option { title, options, .. } => {
                fragments.push(Fragment {
                    block: index,
                    sub: 0,
                    text: title.clone(),
                });
                for (i, item) in options.iter().enumerate() {
                    fragments.push(Fragment {
                        block: index,
                        sub: i + 1,
                        text: item.label.clone(),
                    });
                }
            }
            // Search results point at untranslated documents; their headers
            // and titles stay in the pivot language alongside them.
            ResponseBlock::Search { .. }
            | ResponseBlock::Pause { .. }
            | ResponseBlock::Image { .. }
            | ResponseBlock::ConnectToAgent { .. } => {}
        }
    }
    fragments
}

/// Sequential cursor pairing each recorded fragment with its translation,
/// consumed by a single pass over the block list.
#[derive(Debug)]
pub struct SpliceCursor {
    pairs: std::iter::Peekable<std::vec::IntoIter<(Fragment, String)>>,
}

impl SpliceCursor {
    /// Pair fragments with translations, rejecting any count mismatch
    /// before a single block is touched.
    pub fn new(
        fragments: Vec<Fragment>,
        translations: Vec<String>,
    ) -> Result<Self, GatewayError> {
        if fragments.len() != translations.len() {
            return Err(GatewayError::FragmentMismatch {
                extracted: fragments.len(),
                translated: translations.len(),
            });
        }
        let pairs: Vec<_> = fragments.into_iter().zip(translations).collect();
        Ok(Self {
            pairs: pairs.into_iter().peekable(),
        })
    }

    /// Write every translation back to its recorded coordinate.
    ///
    /// Consumes the cursor; errors if any fragment points at a block or
    /// sub-index the list no longer has, or if fragments remain after the
    /// walk (both mean extraction and splice saw different block lists).
    pub fn apply(mut self, blocks: &mut [ResponseBlock]) -> Result<(), GatewayError> {
        for (index, block) in blocks.iter_mut().enumerate() {
            while self.pairs.peek().is_some_and(|(f, _)| f.block == index) {
                let Some((fragment, translation)) = self.pairs.next() else {
                    break;
                };
                write_fragment(block, &fragment, translation)?;
            }
        }
        if let Some((fragment, _)) = self.pairs.next() {
            return Err(GatewayError::SpliceDesync {
                block: fragment.block,
                sub: fragment.sub,
            });
        }
        Ok(())
    }
}

fn write_fragment(
    block: &mut ResponseBlock,
    fragment: &Fragment,
    translation: String,
) -> Result<(), GatewayError> {
    let desync = GatewayError::SpliceDesync {
        block: fragment.block,
        sub: fragment.sub,
    };
    match block {
        ResponseBlock::Text { text } if fragment.sub == 0 => {
            *text = translation;
            Ok(())
        }
        ResponseBlock::Suggestion { title, suggestions } => {
            if fragment.sub == 0 {
                *title = translation;
                Ok(())
            } else {
                match suggestions.get_mut(fragment.sub - 1) {
                    Some(item) => {
                        item.label = translation;
                        Ok(())
                    }
                    None => Err(desync),
                }
            }
        }
        ResponseBlock::Option { title, options, .. } => {
            if fragment.sub == 0 {
                *title = translation;
                Ok(())
            } else {
                match options.get_mut(fragment.sub - 1) {
                    Some(item) => {
                        item.label = translation;
                        Ok(())
                    }
                    None => Err(desync),
                }
            }
        }
        _ => Err(desync),
    }
}
