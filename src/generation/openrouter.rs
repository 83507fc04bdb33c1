//! OpenRouter chat completions transport.

use super::transport::{CompletionRequest, LlmTransport};
use crate::config::OpenRouterConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Clone)]
pub struct OpenRouterTransport {
    config: OpenRouterConfig,
    client: reqwest::Client,
}

impl OpenRouterTransport {
    pub fn new(config: OpenRouterConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Builds a transport from the `OPENROUTER_*` environment variables.
    pub fn from_env() -> Result<Self, TransportError> {
        OpenRouterConfig::from_env()
            .map(Self::new)
            .ok_or_else(|| {
                TransportError::Request("OPENROUTER_API_KEY environment variable not set".into())
            })
    }
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[async_trait]
impl LlmTransport for OpenRouterTransport {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, TransportError> {
        let mut builder = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(request);
        if let Some(referer) = &self.config.referer {
            builder = builder.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.title {
            builder = builder.header("X-Title", title);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(TransportError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(
            "OpenRouter raw response: {}",
            body.chars().take(1000).collect::<String>()
        );

        let parsed: ApiResponse =
            serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }

    fn provider_name(&self) -> &str {
        "openrouter"
    }
}
