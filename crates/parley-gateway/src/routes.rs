//! Router setup with all gateway routes and middleware.

use axum::http::{header, HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
///
/// The gateway is consumed by a browser client, so CORS allows any origin
/// with the content-type and API-key headers the client sends.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-id"),
        ]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/session", post(handlers::create_session))
        .route("/message", post(handlers::send_message))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
