//! Voxbrief LLM Integration
//!
//! OpenAI-compatible chat client and voicemail summarization

mod client;
mod llm_trait;
mod prompts;
mod stub;
mod summarize;
mod types;

pub use client::OpenAiClient;
pub use llm_trait::Summarizer;
pub use prompts::{user_prompt, SYSTEM_PROMPT};
pub use stub::StubSummarizer;
pub use summarize::VoicemailSummarizer;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, SummaryOptions};
