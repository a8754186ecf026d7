use std::sync::Arc;
use voxbrief_common::{AppConfig, Result};
use voxbrief_llm::{Summarizer, VoicemailSummarizer};
use voxbrief_stt::{Transcriber, TranscriptionOptions, WhisperApiClient};

use crate::storage::TransientStorage;
use crate::workflow::VoicemailWorkflow;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Upload processing pipeline
    pub workflow: VoicemailWorkflow,
}

impl AppState {
    /// Create state with the given remote clients
    pub fn new(
        config: AppConfig,
        transcriber: Arc<dyn Transcriber>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Result<Self> {
        let storage = TransientStorage::new(config.upload_dir.clone())?;

        let options = TranscriptionOptions::from_config(&config);

        let workflow = VoicemailWorkflow::new(transcriber, summarizer, storage, options);

        Ok(Self { config, workflow })
    }

    /// Create state wired to the OpenAI-compatible services named in `config`
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let transcriber = Arc::new(WhisperApiClient::from_config(&config)?);
        let summarizer = Arc::new(VoicemailSummarizer::from_config(&config)?);
        Self::new(config, transcriber, summarizer)
    }
}
