use super::transport::{ChatMessage, ChatRole, CompletionRequest};
use crate::config::GenerationConfig;
use crate::verb::Verb;
use itertools::Itertools;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates call flow JSON specifications.";

/// The two-node example flow shown to the model.
pub const EXAMPLE_FLOW: &str = r#"{
  "nodes": [
    { "id": "1", "position": { "x": 50, "y": 50 }, "data": { "label": "ACCEPT", "verb": "accept", "params": {} } },
    { "id": "2", "position": { "x": 250, "y": 50 }, "data": { "label": "PLAY", "verb": "play", "params": { "media": "sound:hello-world" } } }
  ],
  "edges": [
    { "id": "e1-2", "source": "1", "target": "2", "animated": true }
  ]
}"#;

/// Builds the user prompt for a free-text flow request.
pub fn build_user_prompt(query: &str) -> String {
    let verbs = Verb::ALL.iter().map(|v| v.as_str()).join(", ");
    format!(
        r#"You are a call-flow designer.
Given the following user query:
"{query}"
Generate a JSON call flow that meets the user's requirements.
Use only these verbs: {verbs}.
Start with exactly one "accept" node. Nodes with verb "hangup" have no outgoing edges.
Set "sourceHandle" to "success" or "failure" on an edge to branch on the outcome of a step.
The JSON must be in the following format and nothing else:
{EXAMPLE_FLOW}
Please output only valid JSON."#
    )
}

/// Assembles the stateless completion request for `query`.
pub fn build_request(query: &str, config: &GenerationConfig) -> CompletionRequest {
    CompletionRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage {
                role: ChatRole::System,
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: build_user_prompt(query),
            },
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    }
}
