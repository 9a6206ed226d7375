//! Domain-focused API endpoint modules.
//!
//! Shared error shapes and request helpers live here in mod.rs.

mod analysis;
mod documents;
mod health;

use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;

// ── Shared types ─────────────────────────────────────────────────

/// Every failure body is `{"error": "..."}`, rendered verbatim by clients.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);
pub type ApiResult<T> = Result<T, ApiError>;

pub(crate) fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub(crate) fn not_found(what: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("{what} not found"),
        }),
    )
}

pub(crate) fn internal_error(message: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub(crate) fn llm_unavailable() -> ApiError {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: "Document analysis is not configured. Set GEMINI_API_KEY.".into(),
        }),
    )
}

// ── Language negotiation ─────────────────────────────────────────

/// Resolve the response language: explicit request field first, then the
/// `Accept-Language` header's primary tag. Unrecognized codes are passed
/// through; the LLM clients fall back to English for anything unknown.
pub(crate) fn preferred_language(explicit: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(lang) = explicit.map(str::trim).filter(|l| !l.is_empty()) {
        return lang.to_string();
    }
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.split(';').next())
        .and_then(|v| v.trim().split('-').next())
        .map(|v| v.to_lowercase())
        .filter(|v| !v.is_empty() && *v != "*")
        .unwrap_or_else(|| "en".to_string())
}

// ── Re-exports ───────────────────────────────────────────────────

pub use analysis::{ask_question, get_analysis, get_messages};
pub use documents::{analyze_text, upload};
pub use health::{health, root};
