//! HTTP router construction.
//!
//! Assembles all Axum routes and middleware into a single `Router`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route(
            "/api/documents/upload",
            post(api::upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/documents/analyze-text", post(api::analyze_text))
        .route("/api/analysis/{id}", get(api::get_analysis))
        .route("/api/analysis/{id}/question", post(api::ask_question))
        .route("/api/analysis/{id}/messages", get(api::get_messages))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
