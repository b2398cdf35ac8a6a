//! Shared data model, configuration, and errors for Parley.
//!
//! Defines the dialogue backend's structured response blocks, the wire
//! envelopes for the dialogue/session/translation contracts, and the
//! TOML configuration consumed by every other crate.

pub mod config;
pub mod error;
pub mod types;
pub mod wire;

pub use config::ParleyConfig;
pub use error::{ParleyError, Result};
pub use types::{OptionItem, ResponseBlock, SearchHit, SuggestionItem};
pub use wire::{
    DialogueEnvelope, DialogueOutput, DialogueRequest, DialogueResult, SessionEnvelope,
    SessionResult, TranslationEnvelope, TranslationItem, TranslationRequest, TranslationResult,
};
