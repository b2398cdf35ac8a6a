//! Route handler functions for the gateway endpoints.
//!
//! Each handler forwards to the shared `MessageChannel` and returns the
//! backend envelope as-is; the client reads success from the in-body
//! `status` field, so handler-level errors only cover the cases where no
//! envelope exists at all.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use parley_core::wire::{DialogueEnvelope, DialogueRequest, SessionEnvelope};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /session - establish a fresh dialogue session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<SessionEnvelope>, ApiError> {
    let envelope = state.channel.create_session().await.map_err(|e| {
        warn!(error = %e, "Session creation failed");
        ApiError::from(e)
    })?;
    info!(status = envelope.status, "Session create forwarded");
    Ok(Json(envelope))
}

/// POST /message - deliver one utterance through the translation gateway.
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<DialogueRequest>,
) -> Result<Json<DialogueEnvelope>, ApiError> {
    if request.source_lang.is_empty() {
        return Err(ApiError::BadRequest("sourceLang must not be empty".to_string()));
    }

    let envelope = state.channel.send(request).await.map_err(|e| {
        warn!(error = %e, "Message delivery failed");
        ApiError::from(e)
    })?;
    info!(status = envelope.status, "Message forwarded");
    Ok(Json(envelope))
}
