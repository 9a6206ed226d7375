//! Stored-analysis retrieval and the follow-up Q&A flow.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use lexplain_core::model::{Analysis, ChatMessage};
use lexplain_store::NewChatMessage;

use crate::state::AppState;

use super::{bad_request, internal_error, llm_unavailable, not_found, preferred_language, ApiResult};

// ── GET /api/analysis/{id} ────────────────────────────────────

pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Analysis>> {
    let analysis = state
        .store
        .get_analysis(&id)
        .await
        .ok_or_else(|| not_found("Analysis"))?;
    Ok(Json(analysis))
}

// ── POST /api/analysis/{id}/question ──────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: Option<String>,
    pub language: Option<String>,
}

pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<QuestionRequest>,
) -> ApiResult<Json<ChatMessage>> {
    let question = req
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| bad_request("Question is required"))?;

    let qa = state.qa.as_ref().ok_or_else(llm_unavailable)?;
    let language = preferred_language(req.language.as_deref(), &headers);

    let analysis = state
        .store
        .get_analysis(&id)
        .await
        .ok_or_else(|| not_found("Analysis"))?;
    let document = state
        .store
        .get_document(&analysis.document_id)
        .await
        .ok_or_else(|| not_found("Document"))?;

    // Prior Q&A pairs become conversational context for the model.
    let previous = state.store.get_chat_messages(&id).await;
    let context = previous
        .iter()
        .map(|msg| format!("Q: {}\nA: {}", msg.question, msg.answer))
        .collect::<Vec<_>>()
        .join("\n\n");
    let context = (!context.is_empty()).then_some(context.as_str());

    let answer = qa
        .ask(&document.content, question, context, &language)
        .await
        .map_err(|e| {
            error!("question answering failed: {e}");
            internal_error(format!("Failed to answer question: {e}"))
        })?;

    let message = state
        .store
        .create_chat_message(NewChatMessage {
            analysis_id: id.clone(),
            question: question.to_string(),
            answer,
        })
        .await;

    info!(analysis_id = %id, message_id = %message.id, "chat message stored");

    Ok(Json(message))
}

// ── GET /api/analysis/{id}/messages ───────────────────────────

pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ChatMessage>>> {
    Ok(Json(state.store.get_chat_messages(&id).await))
}
