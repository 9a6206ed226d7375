pub mod analysis;
pub mod provider;
pub mod providers;
pub mod qa;
pub mod retry;

pub use analysis::{AnalysisClient, AnalysisError};
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use qa::{QaClient, QaError};
pub use retry::RetryPolicy;

use std::time::Duration;

use lexplain_core::config::LlmConfig;
use providers::gemini::GeminiProvider;

/// Build both clients from config. Fails when no API key is configured.
pub fn clients_from_config(config: &LlmConfig) -> Result<(AnalysisClient, QaClient), LlmError> {
    let api_key = config
        .gemini_api_key
        .clone()
        .ok_or_else(|| LlmError::NotConfigured("GEMINI_API_KEY not set".into()))?;
    let timeout = Duration::from_secs(config.request_timeout_secs);

    // The analysis path requests a JSON-formatted response; Q&A is plain text.
    let analysis_provider =
        GeminiProvider::new(api_key.clone(), config.analysis_model.clone(), timeout)
            .with_json_response();
    let qa_provider = GeminiProvider::new(api_key, config.qa_model.clone(), timeout);

    Ok((
        AnalysisClient::new(Box::new(analysis_provider), config.max_output_tokens),
        QaClient::new(Box::new(qa_provider), config.max_output_tokens),
    ))
}
