//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::service::MessageChannel;

/// Shared gateway state, cheap to clone into handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// The channel requests are forwarded through (usually a
    /// `MessageGateway`, a bare dialogue client in direct deployments).
    pub channel: Arc<dyn MessageChannel>,
    /// Server start time for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(channel: Arc<dyn MessageChannel>) -> Self {
        Self {
            channel,
            start_time: Instant::now(),
        }
    }
}
