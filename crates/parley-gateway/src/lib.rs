//! Translation gateway: the stateless transform between the chat client
//! and the dialogue backend.
//!
//! Invoked once on the way in (user text to the pivot locale) and once on
//! the way out (fragment extraction, one batched translation call, splice
//! back into the original block positions). The `MessageGateway` service
//! composes both halves around the dialogue call, and a small axum router
//! exposes the whole thing over HTTP.

pub mod error;
pub mod fragment;
pub mod handlers;
pub mod inbound;
pub mod outbound;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{ApiError, GatewayError};
pub use fragment::{extract_fragments, Fragment, SpliceCursor};
pub use inbound::translate_inbound;
pub use outbound::remap_outbound;
pub use routes::create_router;
pub use service::{MessageChannel, MessageGateway};
pub use state::AppState;
