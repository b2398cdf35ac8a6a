//! Delivery error taxonomy and the retry policy attached to it.

use thiserror::Error;

use parley_backend::BackendError;
use parley_gateway::GatewayError;

/// Why a message could not be delivered.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The backend answered with a failure status. A fresh session often
    /// clears these, so the orchestrator retries.
    #[error("backend reported status {0}")]
    Transient(u16),

    /// The cached session id is no longer valid.
    #[error("session expired")]
    SessionExpired,

    /// The translation remap failed; the dialogue turn itself may be fine
    /// on a retry.
    #[error("translation failed: {0}")]
    Translation(String),

    /// The backend reply did not match the contract. Retrying would get the
    /// same garbage back.
    #[error("malformed backend reply: {0}")]
    Malformed(String),

    /// The channel itself is unreachable (DNS, TLS, connect, timeout).
    #[error("channel unavailable: {0}")]
    Channel(String),
}

impl DeliveryError {
    /// Whether another attempt on a renewed session is worth making.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DeliveryError::Transient(_)
                | DeliveryError::SessionExpired
                | DeliveryError::Translation(_)
        )
    }
}

impl From<GatewayError> for DeliveryError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Backend(BackendError::Status(code)) => DeliveryError::Transient(code),
            GatewayError::Backend(BackendError::Malformed(msg)) => DeliveryError::Malformed(msg),
            GatewayError::Backend(err @ BackendError::TranslationCount { .. }) => {
                DeliveryError::Translation(err.to_string())
            }
            GatewayError::Backend(BackendError::Transport(err)) => {
                DeliveryError::Channel(err.to_string())
            }
            err @ (GatewayError::FragmentMismatch { .. } | GatewayError::SpliceDesync { .. }) => {
                DeliveryError::Translation(err.to_string())
            }
        }
    }
}
