//! Conversational front end for Parley.
//!
//! Owns the message transcript, the delivery retry loop with session
//! renewal, and input-history navigation. All backend traffic goes through
//! a `MessageChannel`, so the orchestrator never knows whether translation
//! happens on the way.

pub mod error;
pub mod history;
pub mod orchestrator;
pub mod types;

pub use error::DeliveryError;
pub use history::{earlier_user_message, later_user_message};
pub use orchestrator::ChatOrchestrator;
pub use types::{ConversationMessage, DeliveryState, MessageOrigin};
