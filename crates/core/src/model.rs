//! Domain entities shared across the workspace.
//!
//! Wire names are camelCase to match the public API surface; all entities are
//! immutable once created and carry server-generated uuid identifiers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh opaque entity identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// ── Analysis building blocks ──────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Review,
    Negotiate,
    Legal,
    Clarify,
}

/// A flagged concern with a severity level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskItem {
    pub level: RiskLevel,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// An extracted contract section paired with a simplified explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clause {
    pub title: String,
    pub original_text: String,
    pub simplified_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: i64,
    pub title: String,
    pub description: String,
    pub action_type: ActionType,
}

/// Plain-language summary with open-ended extracted key terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub summary: String,
    #[serde(default)]
    pub key_terms: HashMap<String, String>,
    pub document_type: String,
}

/// The structured output of one model analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullAnalysis {
    pub summary: DocumentSummary,
    pub risk_items: Vec<RiskItem>,
    pub clauses: Vec<Clause>,
    pub recommendations: Vec<Recommendation>,
    pub word_count: u32,
    pub risk_level: RiskLevel,
}

// ── Stored entities ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub user_id: Option<String>,
    pub filename: Option<String>,
    pub content: String,
    pub document_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: String,
    pub document_id: String,
    pub summary: String,
    pub risk_level: RiskLevel,
    pub key_terms: HashMap<String, String>,
    pub risk_items: Vec<RiskItem>,
    pub clauses: Vec<Clause>,
    pub recommendations: Vec<Recommendation>,
    pub word_count: u32,
    pub processing_time: String,
    pub created_at: DateTime<Utc>,
}

/// One question/answer pair scoped to a specific analysis. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub analysis_id: String,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Present for completeness of the storage contract; no auth flow is exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
        let parsed: RiskLevel = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, RiskLevel::Medium);
    }

    #[test]
    fn full_analysis_roundtrips_camel_case() {
        let json = serde_json::json!({
            "summary": {
                "summary": "A one-year lease.",
                "keyTerms": {"landlord": "Acme Properties"},
                "documentType": "rental agreement"
            },
            "riskItems": [{
                "level": "high",
                "title": "Auto-renewal",
                "description": "Renews unless cancelled 90 days ahead.",
                "section": "12.3"
            }],
            "clauses": [{
                "title": "Termination",
                "originalText": "Either party may terminate...",
                "simplifiedText": "You can cancel with notice."
            }],
            "recommendations": [{
                "priority": 1,
                "title": "Negotiate notice period",
                "description": "Ask for 30 days.",
                "actionType": "negotiate"
            }],
            "wordCount": 420,
            "riskLevel": "medium"
        });

        let analysis: FullAnalysis = serde_json::from_value(json).unwrap();
        assert_eq!(analysis.summary.document_type, "rental agreement");
        assert_eq!(analysis.risk_items[0].level, RiskLevel::High);
        assert_eq!(analysis.clauses[0].section, None);
        assert_eq!(analysis.recommendations[0].action_type, ActionType::Negotiate);
        assert_eq!(analysis.risk_level, RiskLevel::Medium);

        let back = serde_json::to_value(&analysis).unwrap();
        assert_eq!(back["riskItems"][0]["section"], "12.3");
        assert_eq!(back["summary"]["keyTerms"]["landlord"], "Acme Properties");
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
