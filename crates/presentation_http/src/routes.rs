//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, middleware::RequestIdLayer, openapi, state::AppState};

/// Create the main router with all routes
///
/// JSON bodies are capped at `server.max_body_size_json_bytes`; an
/// oversized body is answered with a 413 envelope.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_json_bytes;

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Tourism API
        .route("/api/route/getRoute", get(handlers::route::get_route))
        .route("/api/ai-trip/generate", post(handlers::trip::generate_trip))
        // Documentation
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestIdLayer::new())
        .with_state(state)
}
