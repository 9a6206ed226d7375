//! Grounded question answering over an already-analyzed document.
//!
//! Uses the faster model variant and a shorter backoff than the analysis
//! path since this call sits behind an interactive chat box.

use std::time::Duration;

use crate::provider::{LlmError, LlmProvider, Message, Role};
use crate::retry::RetryPolicy;

const QA_TEMPERATURE: f32 = 0.3;

fn language_instruction(language: &str) -> &'static str {
    match language {
        "hi" => "हिंदी में जवाब दें और स्पष्ट, सुलभ भाषा का उपयोग करें।",
        "gu" => "ગુજરાતીમાં જવાબ આપો અને સ્પષ્ટ, સુલભ ભાષાનો ઉપયોગ કરો।",
        "mr" => "मराठीत उत्तर द्या आणि स्पष्ट, सुलभ भाषेचा वापर करा।",
        "ta" => "தமிழில் பதிலளிக்கவும் மற்றும் தெளிவான, அணுகக்கூடிய மொழியைப் பயன்படுத்தவும்.",
        "bn" => "বাংলায় উত্তর দিন এবং স্পষ্ট, সুলভ ভাষা ব্যবহার করুন।",
        _ => "Respond in English with clear, accessible language.",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QaError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("provider returned an empty answer")]
    EmptyAnswer,
}

pub struct QaClient {
    provider: Box<dyn LlmProvider>,
    retry: RetryPolicy,
    max_tokens: u32,
}

impl QaClient {
    pub fn new(provider: Box<dyn LlmProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            // 3 attempts, backing off 1s then 2s between them.
            retry: RetryPolicy::new(3, Duration::from_secs(1)),
            max_tokens,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Answer a question strictly from the supplied document content.
    /// `prior_context` carries earlier Q&A pairs for conversational follow-ups.
    pub async fn ask(
        &self,
        document_content: &str,
        question: &str,
        prior_context: Option<&str>,
        language: &str,
    ) -> Result<String, QaError> {
        let messages = vec![
            Message {
                role: Role::System,
                content: build_system_prompt(language),
            },
            Message {
                role: Role::User,
                content: build_user_prompt(document_content, question, prior_context),
            },
        ];

        tracing::info!(question_chars = question.len(), language, "answering document question");

        let answer = self
            .retry
            .run(
                || {
                    self.provider
                        .complete(messages.clone(), QA_TEMPERATURE, self.max_tokens)
                },
                LlmError::is_transient,
            )
            .await?;

        if answer.trim().is_empty() {
            return Err(QaError::EmptyAnswer);
        }

        Ok(answer)
    }
}

fn build_system_prompt(language: &str) -> String {
    format!(
        r#"You are a legal document assistant. Answer questions about the provided legal document using only the information contained within it.

Rules:
- Base your answers solely on the document content
- If information isn't in the document, clearly state that
- Provide specific references to sections or clauses when possible
- Use clear, accessible language
- Keep responses concise but comprehensive

Language Instructions: {}"#,
        language_instruction(language),
    )
}

fn build_user_prompt(document_content: &str, question: &str, prior_context: Option<&str>) -> String {
    let mut prompt = String::new();
    if let Some(context) = prior_context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!("Previous conversation context:\n{context}\n\n"));
    }
    prompt.push_str(&format!("Document content:\n{document_content}\n\nQuestion: {question}"));
    prompt
}
