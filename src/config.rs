//! Settings for flow generation and the LLM provider.

use serde::{Deserialize, Serialize};

/// Default model requested from the provider.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";
/// Low temperature keeps generated flows close to deterministic.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";

/// Parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl GenerationConfig {
    /// Defaults, with the model overridden by `OPENROUTER_MODEL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = std::env::var("OPENROUTER_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        config
    }
}

/// Connection settings for an OpenRouter-compatible chat completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
    /// Sent as `HTTP-Referer`.
    #[serde(default)]
    pub referer: Option<String>,
    /// Sent as `X-Title`.
    #[serde(default)]
    pub title: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_OPENROUTER_URL.to_string()
}

impl OpenRouterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
            referer: None,
            title: None,
        }
    }

    /// Reads `OPENROUTER_API_KEY`, `OPENROUTER_HTTP_REFERER` and `OPENROUTER_X_TITLE`.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY").ok()?;
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Some(Self {
            base_url: non_empty("OPENROUTER_BASE_URL").unwrap_or_else(default_base_url),
            api_key,
            referer: non_empty("OPENROUTER_HTTP_REFERER"),
            title: non_empty("OPENROUTER_X_TITLE"),
        })
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_generation_config_fills_defaults() {
        let config: GenerationConfig = serde_json::from_str(r#"{ "temperature": 0.0 }"#).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let mut config = OpenRouterConfig::new("key");
        config.base_url = "https://example.test/v1/".to_string();
        assert_eq!(
            config.completions_url(),
            "https://example.test/v1/chat/completions"
        );
    }
}
