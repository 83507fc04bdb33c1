//! Turns a natural-language request into a validated `FlowGraph` through an LLM.
//!
//! The pipeline is: prompt, transport call, fence cleanup, JSON decode, document
//! conversion, structural repair, validation. Each stage fails with its own
//! `GenerationError` variant; nothing is ever replaced by a default flow.

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::flow::{FlowDocument, FlowGraph, IntoFlow};
use serde_json::Value;

pub mod cleanup;
#[cfg(feature = "openrouter")]
pub mod openrouter;
pub mod prompt;
mod repair;
pub mod transport;

pub use cleanup::strip_code_fence;
#[cfg(feature = "openrouter")]
pub use openrouter::OpenRouterTransport;
pub use transport::{ChatMessage, ChatRole, CompletionRequest, LlmTransport};

/// Generates call flows with a given transport.
pub struct FlowGenerator<T: LlmTransport> {
    transport: T,
    config: GenerationConfig,
}

impl<T: LlmTransport> FlowGenerator<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, GenerationConfig::default())
    }

    pub fn with_config(transport: T, config: GenerationConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Asks the model for a flow matching `query` and returns it once it validates.
    ///
    /// The request is stateless. Transport failures are surfaced as-is and never retried.
    pub async fn generate(&self, query: &str) -> Result<FlowGraph, GenerationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GenerationError::EmptyQuery);
        }

        let request = prompt::build_request(query, &self.config);
        tracing::info!(
            provider = self.transport.provider_name(),
            model = %self.config.model,
            "requesting call flow"
        );

        let content = self
            .transport
            .complete(&request)
            .await?
            .filter(|c| !c.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;
        tracing::debug!(chars = content.len(), "received completion");

        interpret_response(&content)
    }
}

/// Runs the post-transport half of the pipeline on a raw completion text.
pub fn interpret_response(content: &str) -> Result<FlowGraph, GenerationError> {
    let cleaned = strip_code_fence(content);

    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        tracing::warn!(error = %e, "LLM response is not valid JSON");
        GenerationError::Parse {
            raw: cleaned.to_string(),
            message: e.to_string(),
        }
    })?;

    let mut graph = FlowDocument::from_value(value)
        .and_then(|document| document.into_flow())
        .map_err(|source| GenerationError::Document {
            raw: cleaned.to_string(),
            source,
        })?;

    repair_and_validate(&mut graph)?;
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "generated call flow"
    );
    Ok(graph)
}

/// Applies the bounded repair policy, then requires a fully valid graph.
pub fn repair_and_validate(graph: &mut FlowGraph) -> Result<(), GenerationError> {
    let Err(violations) = graph.validate() else {
        return Ok(());
    };

    let dropped = repair::drop_dangling_edges(graph, &violations);
    if !dropped.is_empty() {
        tracing::warn!(edges = ?dropped, "dropped edges with unknown endpoints");
    }

    graph.validate().map_err(|violations| {
        tracing::warn!(count = violations.len(), "generated flow failed validation");
        GenerationError::Schema { violations }
    })
}
