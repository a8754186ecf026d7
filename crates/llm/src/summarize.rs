use async_trait::async_trait;
use tracing::{debug, info};
use voxbrief_common::{AppConfig, Result, VoxbriefError};

use crate::client::OpenAiClient;
use crate::llm_trait::Summarizer;
use crate::prompts::{user_prompt, SYSTEM_PROMPT};
use crate::types::{ChatCompletionRequest, ChatMessage, SummaryOptions};

/// Voicemail summarizer backed by a chat completion model
pub struct VoicemailSummarizer {
    client: OpenAiClient,
    options: SummaryOptions,
}

impl VoicemailSummarizer {
    /// Create new summarizer
    pub fn new(client: OpenAiClient, options: SummaryOptions) -> Self {
        Self { client, options }
    }

    /// Create summarizer from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let options = SummaryOptions {
            model: config.summary_model.clone(),
            max_tokens: config.summary_max_tokens,
            temperature: config.summary_temperature,
        };
        Ok(Self::new(OpenAiClient::from_config(config)?, options))
    }

    /// Build the chat request for a transcript
    pub fn build_request(&self, transcript: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.options.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(user_prompt(transcript)),
            ],
            max_tokens: Some(self.options.max_tokens),
            temperature: Some(self.options.temperature),
        }
    }
}

#[async_trait]
impl Summarizer for VoicemailSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        info!("Starting summarization - Text length: {} chars", transcript.len());

        let request = self.build_request(transcript);
        let summary = self.client.chat(&request).await.map_err(|e| match e {
            VoxbriefError::Network(detail) => VoxbriefError::Summarization(detail),
            other => VoxbriefError::summarization(other.to_string()),
        })?;

        debug!("Summary generated - Length: {} chars", summary.len());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summarizer_for(server: &MockServer) -> VoicemailSummarizer {
        let client = OpenAiClient::new("sk-test", server.uri(), Duration::from_secs(5)).unwrap();
        VoicemailSummarizer::new(client, SummaryOptions::default())
    }

    #[test]
    fn test_request_shape() {
        let client =
            OpenAiClient::new("sk-test", "http://localhost:1", Duration::from_secs(1)).unwrap();
        let summarizer = VoicemailSummarizer::new(client, SummaryOptions::default());
        let request = summarizer.build_request("Hi, call me back.");

        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.max_tokens, Some(500));
        assert_eq!(request.temperature, Some(0.3));
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(request.messages[1].role, "user");
        assert!(request.messages[1].content.ends_with("Hi, call me back."));
    }

    #[tokio::test]
    async fn test_summarize_sends_bounded_low_temperature_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 500,
                "temperature": 0.3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Caller requests callback."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summary = summarizer_for(&server)
            .summarize("Hi, call me back.")
            .await
            .unwrap();
        assert_eq!(summary, "Caller requests callback.");
    }

    #[tokio::test]
    async fn test_service_error_becomes_summarization_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = summarizer_for(&server)
            .summarize("Hi, call me back.")
            .await
            .unwrap_err();

        assert!(matches!(err, VoxbriefError::Summarization(_)));
        let message = err.to_string();
        assert!(message.starts_with("Failed to summarize text:"));
        assert!(message.contains("429"));
    }
}
