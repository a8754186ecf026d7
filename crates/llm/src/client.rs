use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use voxbrief_common::{AppConfig, Result, VoxbriefError};

use crate::types::{ChatCompletionRequest, ChatCompletionResponse};

/// OpenAI-compatible chat completions client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl OpenAiClient {
    /// Create new OpenAI client
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VoxbriefError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("OpenAI client initialized: {}", base_url);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            client,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Single chat completion; returns the first choice's content
    ///
    /// Transport, status and decoding failures come back as `VoxbriefError::Network`.
    /// No retry is attempted.
    pub async fn chat(&self, request: &ChatCompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            "Sending chat request - Model: {}, Messages: {}",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| VoxbriefError::network(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VoxbriefError::network(format!(
                "HTTP {}: {}",
                status,
                body.trim()
            )));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| VoxbriefError::network(format!("invalid response: {}", e)))?;

        let content = result
            .first_content()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| VoxbriefError::network("empty response from model"))?;

        debug!("Received chat response - Length: {}", content.len());
        Ok(content.to_string())
    }

    /// Test connection to the API (lists models)
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| VoxbriefError::network(format!("Failed to connect to {}: {}", self.base_url, e)))?;

        Ok(response.status().is_success())
    }
}
