//! End-to-end tests for the generation pipeline against a stubbed transport.
mod common;
use callflow::config::GenerationConfig;
use callflow::generation::{ChatRole, interpret_response, strip_code_fence};
use callflow::prelude::*;
use common::*;
use tokio_test::block_on;

#[test]
fn test_greeting_request_yields_two_node_flow() {
    let fenced = format!("```json\n{}\n```", GREETING_FLOW_JSON);
    let generator = FlowGenerator::new(StubTransport::answering(&fenced));

    let flow = block_on(generator.generate("simple greeting then hangup"))
        .expect("generation should succeed");

    assert_eq!(flow.node_count(), 2);
    assert_eq!(flow.edge_count(), 1);
    assert_eq!(flow.node("1").unwrap().verb, Verb::Accept);
    assert_eq!(flow.node("2").unwrap().verb, Verb::Play);
    let edge = flow.edges().next().unwrap();
    assert_eq!(edge.branch, Branch::Default);
    assert_eq!(flow.validate(), Ok(()));
}

#[test]
fn test_request_is_stateless_and_low_temperature() {
    let generator = FlowGenerator::new(StubTransport::answering(GREETING_FLOW_JSON));
    block_on(generator.generate("greet the caller")).unwrap();
    block_on(generator.generate("greet the caller again")).unwrap();

    let requests = generator.transport().requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    for request in requests.iter() {
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.model, "openai/gpt-4o");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert_eq!(request.messages[1].role, ChatRole::User);
    }
    assert!(requests[1].messages[1].content.contains("greet the caller again"));
    assert!(!requests[1].messages[1].content.contains("\"greet the caller\""));
}

#[test]
fn test_custom_config_is_sent() {
    let config = GenerationConfig {
        model: "anthropic/claude".to_string(),
        temperature: 0.0,
        max_tokens: 1200,
    };
    let generator =
        FlowGenerator::with_config(StubTransport::answering(GREETING_FLOW_JSON), config);
    block_on(generator.generate("anything")).unwrap();

    let requests = generator.transport().requests.lock().unwrap();
    assert_eq!(requests[0].model, "anthropic/claude");
    assert_eq!(requests[0].max_tokens, 1200);
}

#[test]
fn test_empty_query_never_reaches_transport() {
    let generator = FlowGenerator::new(StubTransport::answering(GREETING_FLOW_JSON));
    let err = block_on(generator.generate("   ")).unwrap_err();
    assert_eq!(err, GenerationError::EmptyQuery);
    assert_eq!(generator.transport().request_count(), 0);
}

#[test]
fn test_transport_failure_is_surfaced() {
    let failure = TransportError::Provider {
        status: 429,
        body: "rate limited".to_string(),
    };
    let generator = FlowGenerator::new(StubTransport::failing(failure.clone()));
    let err = block_on(generator.generate("greeting")).unwrap_err();
    assert_eq!(err, GenerationError::Transport(failure));
    assert_eq!(generator.transport().request_count(), 1);
}

#[test]
fn test_missing_content_is_an_error() {
    let generator = FlowGenerator::new(StubTransport::silent());
    let err = block_on(generator.generate("greeting")).unwrap_err();
    assert_eq!(err, GenerationError::EmptyResponse);

    let generator = FlowGenerator::new(StubTransport::answering("  \n"));
    let err = block_on(generator.generate("greeting")).unwrap_err();
    assert_eq!(err, GenerationError::EmptyResponse);
}

#[test]
fn test_malformed_json_keeps_raw_text() {
    let err = interpret_response("```json\n{\"nodes\": [\n```").unwrap_err();
    match err {
        GenerationError::Parse { raw, .. } => assert_eq!(raw, "{\"nodes\": ["),
        other => panic!("expected Parse, got {:?}", other),
    }
}

#[test]
fn test_leading_prose_fails_loudly() {
    let content = format!("Sure! Here is your flow:\n```json\n{}\n```", GREETING_FLOW_JSON);
    let err = interpret_response(&content).unwrap_err();
    assert!(matches!(err, GenerationError::Parse { .. }));
}

#[test]
fn test_cleanup_of_empty_flow() {
    assert_eq!(
        strip_code_fence("```json\n{\"nodes\":[],\"edges\":[]}\n```"),
        r#"{"nodes":[],"edges":[]}"#
    );
}

#[test]
fn test_missing_entry_is_not_fabricated() {
    let content = r#"{
        "nodes": [{ "id": "1", "data": { "label": "PLAY", "verb": "play", "params": {} } }],
        "edges": []
    }"#;
    match interpret_response(content).unwrap_err() {
        GenerationError::Schema { violations } => {
            assert!(
                violations
                    .iter()
                    .any(|v| v.kind == ViolationKind::MissingEntry)
            );
        }
        other => panic!("expected Schema, got {:?}", other),
    }
}

#[test]
fn test_dangling_edges_are_dropped() {
    let content = r#"{
        "nodes": [
            { "id": "1", "data": { "verb": "accept" } },
            { "id": "2", "data": { "verb": "say", "params": { "text": "Goodbye" } } },
            { "id": "3", "data": { "verb": "hangup" } }
        ],
        "edges": [
            { "id": "e1-2", "source": "1", "target": "2" },
            { "id": "e2-3", "source": "2", "target": "3" },
            { "id": "e3-4", "source": "3", "target": "4" },
            { "id": "e9-2", "source": "9", "target": "2", "sourceHandle": "success" }
        ]
    }"#;
    let flow = interpret_response(content).unwrap();
    assert_eq!(flow.node_count(), 3);
    assert_eq!(flow.edge_count(), 2);
    assert!(flow.edge("e3-4").is_none());
    assert!(flow.edge("e9-2").is_none());
    assert!(flow.is_valid());
}

#[test]
fn test_structural_errors_other_than_dangling_are_not_repaired() {
    let content = r#"{
        "nodes": [
            { "id": "1", "data": { "verb": "accept" } },
            { "id": "2", "data": { "verb": "hangup" } }
        ],
        "edges": [
            { "id": "a", "source": "1", "target": "2" },
            { "id": "b", "source": "2", "target": "1" }
        ]
    }"#;
    match interpret_response(content).unwrap_err() {
        GenerationError::Schema { violations } => {
            assert_eq!(
                violations,
                vec![Violation {
                    kind: ViolationKind::IllegalEdgeEndpoint,
                    subject: Subject::Edge("b".to_string()),
                }]
            );
        }
        other => panic!("expected Schema, got {:?}", other),
    }
}

#[test]
fn test_unknown_verb_is_a_document_error() {
    let content = r#"{ "nodes": [{ "id": "1", "data": { "verb": "transfer" } }], "edges": [] }"#;
    match interpret_response(content).unwrap_err() {
        GenerationError::Document { raw, source } => {
            assert_eq!(raw, content);
            assert!(matches!(source, DocumentError::UnknownVerb { .. }));
        }
        other => panic!("expected Document, got {:?}", other),
    }
}

#[test]
fn test_schema_error_message_lists_violations() {
    let err = interpret_response(r#"{"nodes":[],"edges":[]}"#).unwrap_err();
    assert_eq!(err.to_string(), "Generated flow is invalid: flow: no entry node");
}
