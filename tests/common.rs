//! Common test utilities for building flows and stubbing the LLM transport.
use async_trait::async_trait;
use callflow::prelude::*;
use std::sync::Mutex;

/// The two-node greeting flow used as the example in the generation prompt.
#[allow(dead_code)]
pub const GREETING_FLOW_JSON: &str = r#"{
  "nodes": [
    { "id": "1", "position": { "x": 50, "y": 50 }, "data": { "label": "ACCEPT", "verb": "accept", "params": {} } },
    { "id": "2", "position": { "x": 250, "y": 50 }, "data": { "label": "PLAY", "verb": "play", "params": { "media": "sound:hello-world" } } }
  ],
  "edges": [
    { "id": "e1-2", "source": "1", "target": "2", "animated": true }
  ]
}"#;

/// Builds a valid IVR-style flow.
///
/// Shape: `accept -> say -> gather`, gather branches to `dial` on success and to
/// `hangup` on failure, dial fails over to the same hangup.
#[allow(dead_code)]
pub fn create_ivr_flow() -> FlowGraph {
    let mut flow = FlowGraph::new();
    let mut add = |id: &str, verb: Verb, params: serde_json::Value| {
        let params = params.as_object().cloned().unwrap_or_default();
        flow.insert_node(Node::new(id, verb).with_params(params))
            .expect("fixture node");
    };
    add("1", Verb::Accept, serde_json::json!({}));
    add("2", Verb::Say, serde_json::json!({ "text": "Press 1 for sales" }));
    add("3", Verb::Gather, serde_json::json!({ "maxDigits": 1 }));
    add("4", Verb::Dial, serde_json::json!({ "target": "PJSIP/200" }));
    add("5", Verb::Hangup, serde_json::json!({}));

    flow.add_edge("1", "2", Branch::Default).expect("fixture edge");
    flow.add_edge("2", "3", Branch::Default).expect("fixture edge");
    flow.add_edge("3", "4", Branch::Success).expect("fixture edge");
    flow.add_edge("3", "5", Branch::Failure).expect("fixture edge");
    flow.add_edge("4", "5", Branch::Failure).expect("fixture edge");
    flow
}

/// A transport that replays a canned answer and records the requests it saw.
#[allow(dead_code)]
pub struct StubTransport {
    answer: std::result::Result<Option<String>, TransportError>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

#[allow(dead_code)]
impl StubTransport {
    pub fn answering(content: &str) -> Self {
        Self {
            answer: Ok(Some(content.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self {
            answer: Ok(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: TransportError) -> Self {
        Self {
            answer: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmTransport for StubTransport {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<Option<String>, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer.clone()
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}
