//! Service info and health endpoints.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub timestamp: String,
    pub endpoints: &'static [&'static str],
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Legal document analysis API is running",
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        endpoints: &[
            "POST /api/documents/upload",
            "POST /api/documents/analyze-text",
            "GET /api/analysis/{id}",
            "POST /api/analysis/{id}/question",
            "GET /api/analysis/{id}/messages",
        ],
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}
