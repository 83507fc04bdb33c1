use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// A single stateless chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The seam between the generation pipeline and an LLM provider.
///
/// Implementations return the text content of the first completion choice, or
/// `None` if the provider answered without any content.
#[async_trait]
pub trait LlmTransport: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, TransportError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &str;
}
