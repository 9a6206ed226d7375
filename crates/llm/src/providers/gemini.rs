use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{LlmError, LlmProvider, Message, Role};

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    timeout: Duration,
    json_response: bool,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            timeout,
            json_response: false,
        }
    }

    /// Ask the API for `application/json` output (used by the analysis path).
    pub fn with_json_response(mut self) -> Self {
        self.json_response = true;
        self
    }

    /// Build the request body for the Gemini generateContent API.
    fn build_request_body(
        messages: &[Message],
        temperature: f32,
        max_tokens: u32,
        json_response: bool,
    ) -> serde_json::Value {
        // Gemini takes the system prompt in a separate system_instruction field
        let system_msg = messages
            .iter()
            .find(|m| matches!(m.role, Role::System))
            .map(|m| m.content.clone());

        let contents: Vec<serde_json::Value> = messages
            .iter()
            .filter(|m| matches!(m.role, Role::User))
            .map(|m| {
                json!({
                    "role": "user",
                    "parts": [{ "text": m.content }],
                })
            })
            .collect();

        let mut generation_config = json!({
            "temperature": temperature,
            "maxOutputTokens": max_tokens,
        });
        if json_response {
            generation_config["responseMimeType"] = json!("application/json");
        }

        let mut body = json!({
            "contents": contents,
            "generationConfig": generation_config,
        });

        if let Some(system) = system_msg {
            body["system_instruction"] = json!({
                "parts": [{ "text": system }],
            });
        }

        body
    }

    /// Classify a non-200 response. 503 and explicit overload markers in the
    /// body are the transient class; everything else is permanent.
    fn classify_failure(status: u16, body: String) -> LlmError {
        if status == 503 || body.contains("overloaded") || body.contains("UNAVAILABLE") {
            LlmError::Overloaded { status, body }
        } else {
            LlmError::Api { status, body }
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key,
        );

        let body =
            Self::build_request_body(&messages, temperature, max_tokens, self.json_response);

        debug!("Gemini request to model={}", self.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_failure(status, body));
        }

        let resp: serde_json::Value = response.json().await?;
        let content = resp["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                LlmError::Parse("missing candidates[0].content.parts[0].text".into())
            })?
            .to_string();

        Ok(content)
    }
}
