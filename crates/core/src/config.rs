use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            llm: LlmConfig::from_env(),
        }
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upload size cap in megabytes, enforced at the transport boundary.
    pub max_upload_mb: u64,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("SERVER_HOST", "0.0.0.0"),
            port: env_u16("SERVER_PORT", 5000),
            max_upload_mb: env_u64("MAX_UPLOAD_MB", 15),
        }
    }
}

// ── LLM provider ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub gemini_api_key: Option<String>,
    /// Heavier model for full document analysis.
    pub analysis_model: String,
    /// Faster model for follow-up Q&A.
    pub qa_model: String,
    /// Hard cap on each provider call, independent of retry backoff.
    pub request_timeout_secs: u64,
    pub max_output_tokens: u32,
}

impl LlmConfig {
    fn from_env() -> Self {
        Self {
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            analysis_model: env_or("GEMINI_ANALYSIS_MODEL", "gemini-2.5-pro"),
            qa_model: env_or("GEMINI_QA_MODEL", "gemini-2.5-flash"),
            request_timeout_secs: env_u64("LLM_TIMEOUT_SECS", 60),
            max_output_tokens: env_opt("LLM_MAX_OUTPUT_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8192),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}
