//! Full-document analysis client: prompt construction, provider call with
//! bounded retry, and strict validation of the JSON the model returns.

use std::time::Duration;

use lexplain_core::FullAnalysis;

use crate::provider::{LlmError, LlmProvider, Message, Role};
use crate::retry::RetryPolicy;

const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Top-level keys the model must return; validated before deserialization so
/// a missing-field failure can name exactly what was absent.
const REQUIRED_KEYS: [&str; 4] = ["summary", "riskItems", "clauses", "recommendations"];

/// Per-locale output directives. Unrecognized codes fall back to English.
fn language_instruction(language: &str) -> &'static str {
    match language {
        "hi" => "हिंदी में जवाब दें और कानूनी शब्दजाल को सरल भाषा में समझाएं।",
        "gu" => "ગુજરાતીમાં જવાબ આપો અને કાનૂની શબ્દજાળને સરળ ભાષામાં સમજાવો।",
        "mr" => "मराठीत उत्तर द्या आणि कायदेशीर शब्दजाल सोप्या भाषेत समजावून सांगा।",
        "ta" => "தமிழில் பதிலளிக்கவும் மற்றும் சட்ட வார்த்தைகளை எளிய மொழியில் விளக்கவும்.",
        "bn" => "বাংলায় উত্তর দিন এবং আইনি পরিভাষাগুলি সহজ ভাষায় ব্যাখ্যা করুন।",
        _ => "Respond in English with clear, jargon-free explanations.",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("provider returned invalid JSON: {0}")]
    BadJson(String),
    #[error("analysis response missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("analysis response did not match the expected schema: {0}")]
    BadShape(String),
}

pub struct AnalysisClient {
    provider: Box<dyn LlmProvider>,
    retry: RetryPolicy,
    max_tokens: u32,
}

impl AnalysisClient {
    pub fn new(provider: Box<dyn LlmProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            // 3 attempts, backing off 2s then 4s between them.
            retry: RetryPolicy::new(3, Duration::from_secs(2)),
            max_tokens,
        }
    }

    /// Override the retry policy (tests use millisecond backoff).
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Analyze a legal document and return the structured breakdown.
    pub async fn analyze(
        &self,
        content: &str,
        document_type: Option<&str>,
        language: &str,
    ) -> Result<FullAnalysis, AnalysisError> {
        let messages = vec![
            Message {
                role: Role::System,
                content: build_system_prompt(document_type, language),
            },
            Message {
                role: Role::User,
                content: format!("Document to analyze:\n\n{content}"),
            },
        ];

        tracing::info!(
            chars = content.len(),
            language,
            document_type = document_type.unwrap_or("auto-detect"),
            "starting document analysis"
        );

        let raw = self
            .retry
            .run(
                || {
                    self.provider
                        .complete(messages.clone(), ANALYSIS_TEMPERATURE, self.max_tokens)
                },
                LlmError::is_transient,
            )
            .await?;

        parse_analysis(&raw)
    }
}

fn build_system_prompt(document_type: Option<&str>, language: &str) -> String {
    format!(
        r#"You are a legal document analysis expert. Analyze the provided legal document and provide a comprehensive breakdown in JSON format.

Your analysis should include:
1. A plain-language summary with key terms extracted
2. Risk assessment with specific items flagged by severity
3. Key clauses broken down with original and simplified text
4. Actionable recommendations prioritized by importance

Focus on:
- Clear, jargon-free explanations
- Identifying unusual or potentially problematic terms
- Providing practical, actionable advice
- Risk assessment using "high", "medium", "low" levels

Language Instructions: {}

Document type context: {}

Respond with valid JSON matching this structure:
{{
  "summary": {{
    "summary": "string",
    "keyTerms": {{ "<term name>": "string" }},
    "documentType": "string"
  }},
  "riskItems": [
    {{ "level": "high|medium|low", "title": "string", "description": "string", "section": "string" }}
  ],
  "clauses": [
    {{ "title": "string", "originalText": "string", "simplifiedText": "string", "section": "string" }}
  ],
  "recommendations": [
    {{ "priority": number, "title": "string", "description": "string", "actionType": "review|negotiate|legal|clarify" }}
  ],
  "wordCount": number,
  "riskLevel": "high|medium|low"
}}"#,
        language_instruction(language),
        document_type.unwrap_or("auto-detect"),
    )
}

/// Parse and validate the provider's JSON. Malformed JSON and missing keys
/// are distinct, non-retryable failures.
fn parse_analysis(raw: &str) -> Result<FullAnalysis, AnalysisError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| AnalysisError::BadJson(e.to_string()))?;

    let missing: Vec<&'static str> = REQUIRED_KEYS
        .iter()
        .filter(|key| value.get(**key).is_none())
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::MissingFields(missing));
    }

    serde_json::from_value(value).map_err(|e| AnalysisError::BadShape(e.to_string()))
}
