//! Document intake: file upload and pasted-text analysis.
//!
//! Both paths share one pipeline: extract/validate text, persist the
//! document, run the model analysis, persist the result, respond with both
//! records.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use lexplain_core::model::{Clause, Document, DocumentSummary, Recommendation, RiskItem, RiskLevel};
use lexplain_extract::ParsedDocument;
use lexplain_store::{NewAnalysis, NewDocument};

use crate::state::AppState;

use super::{bad_request, internal_error, llm_unavailable, preferred_language, ApiResult};

// ── Response shapes ───────────────────────────────────────────

/// The stored analysis record with the structured summary object swapped in
/// for the flat summary string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBody {
    pub id: String,
    pub document_id: String,
    pub summary: DocumentSummary,
    pub risk_level: RiskLevel,
    pub key_terms: HashMap<String, String>,
    pub risk_items: Vec<RiskItem>,
    pub clauses: Vec<Clause>,
    pub recommendations: Vec<Recommendation>,
    pub word_count: u32,
    pub processing_time: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub document: Document,
    pub analysis: AnalysisBody,
}

// ── POST /api/documents/upload ────────────────────────────────

pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<AnalyzeResponse>> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut document_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Multipart error: {e}")))?
    {
        match field.name().unwrap_or("") {
            "document" => {
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read file: {e}")))?;
                file = Some((filename, bytes.to_vec()));
            }
            "documentType" => {
                document_type = field.text().await.ok().filter(|t| !t.is_empty());
            }
            // Accepted for API compatibility; not wired into the prompt.
            "summaryLength" => {
                let _ = field.text().await;
            }
            _ => {}
        }
    }

    let (filename, bytes) = file.ok_or_else(|| bad_request("No file uploaded"))?;
    let language = preferred_language(None, &headers);

    let parsed = lexplain_extract::extract_file(&bytes, &filename)
        .map_err(|e| bad_request(e.to_string()))?;

    info!(
        filename,
        words = parsed.word_count,
        "parsed uploaded document"
    );

    let response = run_analysis(&state, parsed, document_type, &language).await?;
    Ok(Json(response))
}

// ── POST /api/documents/analyze-text ──────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTextRequest {
    pub content: Option<String>,
    pub document_type: Option<String>,
    /// Accepted for API compatibility; not wired into the prompt.
    #[serde(default)]
    #[allow(dead_code)]
    pub summary_length: Option<String>,
    pub language: Option<String>,
}

pub async fn analyze_text(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeTextRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let content = req
        .content
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| bad_request("Document content is required"))?;

    let language = preferred_language(req.language.as_deref(), &headers);

    let parsed = lexplain_extract::parse_text(content).map_err(|e| bad_request(e.to_string()))?;

    let response = run_analysis(&state, parsed, req.document_type, &language).await?;
    Ok(Json(response))
}

// ── Shared pipeline ───────────────────────────────────────────

async fn run_analysis(
    state: &AppState,
    parsed: ParsedDocument,
    document_type: Option<String>,
    language: &str,
) -> ApiResult<AnalyzeResponse> {
    let client = state.analysis.as_ref().ok_or_else(llm_unavailable)?;

    // Anonymous usage: no owning user.
    let document = state
        .store
        .create_document(NewDocument {
            user_id: None,
            filename: parsed.filename,
            content: parsed.content,
            document_type: Some(
                document_type
                    .clone()
                    .unwrap_or_else(|| "auto-detect".to_string()),
            ),
        })
        .await;

    let start = Instant::now();
    let analysis = client
        .analyze(&document.content, document_type.as_deref(), language)
        .await
        .map_err(|e| {
            error!("document analysis failed: {e}");
            internal_error(format!("Failed to analyze document: {e}"))
        })?;
    let processing_time = format!("{:.1} seconds", start.elapsed().as_secs_f64());

    let stored = state
        .store
        .create_analysis(NewAnalysis {
            document_id: document.id.clone(),
            summary: analysis.summary.summary.clone(),
            risk_level: analysis.risk_level,
            key_terms: analysis.summary.key_terms.clone(),
            risk_items: analysis.risk_items.clone(),
            clauses: analysis.clauses.clone(),
            recommendations: analysis.recommendations.clone(),
            word_count: analysis.word_count,
            processing_time,
        })
        .await;

    info!(
        document_id = %document.id,
        analysis_id = %stored.id,
        risk_level = ?stored.risk_level,
        "analysis stored"
    );

    Ok(AnalyzeResponse {
        document,
        analysis: AnalysisBody {
            id: stored.id,
            document_id: stored.document_id,
            summary: analysis.summary,
            risk_level: stored.risk_level,
            key_terms: stored.key_terms,
            risk_items: stored.risk_items,
            clauses: stored.clauses,
            recommendations: stored.recommendations,
            word_count: stored.word_count,
            processing_time: stored.processing_time,
            created_at: stored.created_at,
        },
    })
}
