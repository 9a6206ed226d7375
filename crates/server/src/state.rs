use lexplain_core::Config;
use lexplain_llm::{AnalysisClient, QaClient};
use lexplain_store::MemStore;
use tracing::{info, warn};

pub struct AppState {
    pub store: MemStore,
    /// Absent when no API key is configured; analysis endpoints answer 503.
    pub analysis: Option<AnalysisClient>,
    pub qa: Option<QaClient>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        store: MemStore,
        analysis: Option<AnalysisClient>,
        qa: Option<QaClient>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            store,
            analysis,
            qa,
            max_upload_bytes,
        }
    }

    /// Build state from config. A missing API key disables the LLM-backed
    /// endpoints with a warning instead of aborting startup.
    pub fn from_config(config: &Config) -> Self {
        let (analysis, qa) = match lexplain_llm::clients_from_config(&config.llm) {
            Ok((analysis, qa)) => {
                info!(
                    analysis_model = %config.llm.analysis_model,
                    qa_model = %config.llm.qa_model,
                    "LLM clients ready"
                );
                (Some(analysis), Some(qa))
            }
            Err(e) => {
                warn!("LLM clients not available: {e}; analysis endpoints will return 503");
                (None, None)
            }
        };

        Self::new(
            MemStore::new(),
            analysis,
            qa,
            (config.server.max_upload_mb as usize) * 1024 * 1024,
        )
    }
}
