//! HTTP clients for the two hosted collaborators.
//!
//! The dialogue and translation backends are reached only through the
//! narrow traits defined here; everything above this crate is oblivious to
//! transport details and can substitute scripted mocks in tests.

pub mod dialogue;
pub mod error;
pub mod translate;

pub use dialogue::{DialogueBackend, HttpDialogueClient};
pub use error::BackendError;
pub use translate::{HttpTranslationClient, TranslationBackend};
