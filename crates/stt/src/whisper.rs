use async_trait::async_trait;
use reqwest::{multipart, Client};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use voxbrief_common::{AppConfig, Result, VoxbriefError};

use crate::audio::mime_type;
use crate::transcriber::Transcriber;
use crate::types::{Transcription, TranscriptionOptions};

/// OpenAI-compatible Whisper transcription client
///
/// Posts the audio file to `{base_url}/audio/transcriptions` and asks for a
/// plain-text response.
#[derive(Debug, Clone)]
pub struct WhisperApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl WhisperApiClient {
    /// Create new Whisper API client
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VoxbriefError::config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();

        info!("Whisper client initialized: {} ({})", base_url, model);
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
            model,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            config.transcription_model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Model name sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn build_form(
        &self,
        audio_path: &Path,
        options: &TranscriptionOptions,
    ) -> Result<multipart::Form> {
        let data = tokio::fs::read(audio_path).await.map_err(|e| {
            VoxbriefError::transcription(format!(
                "cannot read {}: {}",
                audio_path.display(),
                e
            ))
        })?;

        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        debug!("Prepared audio part - File: {}, Size: {} bytes", file_name, data.len());

        let file_part = multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime_type(audio_path))
            .map_err(|e| VoxbriefError::transcription(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);

        if let Some(language) = &options.language {
            form = form.text("language", language.clone());
        }
        if let Some(prompt) = &options.prompt {
            form = form.text("prompt", prompt.clone());
        }
        if let Some(temperature) = options.temperature {
            form = form.text("temperature", temperature.to_string());
        }

        Ok(form)
    }
}

#[async_trait]
impl Transcriber for WhisperApiClient {
    async fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscriptionOptions,
    ) -> Result<Transcription> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let form = self.build_form(audio_path, options).await?;

        debug!("Sending audio to Whisper API - Model: {}", self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VoxbriefError::transcription(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(VoxbriefError::transcription(format!(
                "status {}: {}",
                status,
                body.trim()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| VoxbriefError::transcription(format!("body: {}", e)))?;

        let transcription = Transcription::new(text.trim_end());
        info!(
            chars = transcription.char_count(),
            "Whisper transcription completed"
        );

        Ok(transcription)
    }
}
