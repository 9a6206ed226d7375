use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chat message for the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// Trait for LLM providers. Each backend implements this.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a completion request and return the model's response text.
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status}: {body}")]
    Api { status: u16, body: String },
    /// Provider-side "temporarily unavailable, try again" signal, distinct
    /// from permanent request errors. The only retryable class.
    #[error("provider overloaded (status {status}), try again shortly")]
    Overloaded { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

impl LlmError {
    /// Whether this error class is worth retrying with backoff.
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Overloaded { .. })
    }
}

#[cfg(test)]
pub mod tests_support {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::{LlmError, LlmProvider, Message};

    /// Mock provider replaying a scripted sequence of results. Once the
    /// script is exhausted every further call signals overload.
    pub struct ScriptedProvider {
        script: Mutex<VecDeque<Result<String, LlmError>>>,
        calls: Arc<AtomicU32>,
        seen: Arc<Mutex<Vec<Vec<Message>>>>,
    }

    impl ScriptedProvider {
        pub fn returning(script: Vec<Result<String, LlmError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: Arc::new(AtomicU32::new(0)),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn always_overloaded() -> Self {
            Self::returning(Vec::new())
        }

        /// Handle to the call counter, usable after the provider is boxed.
        pub fn calls(&self) -> Arc<AtomicU32> {
            Arc::clone(&self.calls)
        }

        /// Handle to the recorded message batches.
        pub fn seen(&self) -> Arc<Mutex<Vec<Vec<Message>>>> {
            Arc::clone(&self.seen)
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn complete(
            &self,
            messages: Vec<Message>,
            _temperature: f32,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(messages);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(LlmError::Overloaded {
                        status: 503,
                        body: "The model is overloaded. Please try again later.".into(),
                    })
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_overload_is_transient() {
        assert!(LlmError::Overloaded {
            status: 503,
            body: "overloaded".into()
        }
        .is_transient());
        assert!(!LlmError::Api {
            status: 400,
            body: "bad request".into()
        }
        .is_transient());
        assert!(!LlmError::Parse("nope".into()).is_transient());
    }
}
