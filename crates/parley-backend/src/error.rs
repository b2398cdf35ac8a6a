//! Error taxonomy for backend calls.

use thiserror::Error;

/// Errors from the dialogue/translation HTTP clients.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a usable response (DNS, TLS, connect,
    /// timeout). Not retried by the orchestrator.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success envelope status.
    #[error("backend returned status {0}")]
    Status(u16),

    /// The response body did not match the contract shape.
    #[error("malformed backend response: {0}")]
    Malformed(String),

    /// The translation backend returned a different number of strings than
    /// it was sent.
    #[error("translation count mismatch: sent {sent}, received {received}")]
    TranslationCount { sent: usize, received: usize },
}

impl From<BackendError> for parley_core::ParleyError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::TranslationCount { .. } => {
                parley_core::ParleyError::Translation(err.to_string())
            }
            _ => parley_core::ParleyError::Dialogue(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BackendError::Status(503);
        assert_eq!(err.to_string(), "backend returned status 503");

        let err = BackendError::Malformed("missing field `result`".to_string());
        assert_eq!(
            err.to_string(),
            "malformed backend response: missing field `result`"
        );

        let err = BackendError::TranslationCount {
            sent: 4,
            received: 3,
        };
        assert_eq!(
            err.to_string(),
            "translation count mismatch: sent 4, received 3"
        );
    }

    #[test]
    fn test_errors_implement_debug() {
        let err = BackendError::Status(500);
        assert!(format!("{:?}", err).contains("Status"));
    }
}
