//! The canonical JSON flow document exchanged with renderers, storage and the LLM.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "1", "position": { "x": 50, "y": 50 },
//!       "data": { "label": "ACCEPT", "verb": "accept", "params": {} } }
//!   ],
//!   "edges": [
//!     { "id": "e1-2", "source": "1", "target": "2", "animated": true, "sourceHandle": null }
//!   ]
//! }
//! ```

use super::{Branch, BranchStep, Edge, FlowGraph, Node, Position};
use crate::error::DocumentError;
use crate::verb::{Params, Verb};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire form of a flow, mirroring the document layout one-to-one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowDocument {
    #[serde(default)]
    pub nodes: Vec<DocumentNode>,
    #[serde(default)]
    pub edges: Vec<DocumentEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub data: DocumentNodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNodeData {
    /// Absent labels fall back to the verb's default; an explicit `""` is kept.
    #[serde(default)]
    pub label: Option<String>,
    /// Kept as text so an unknown verb can be reported against its node.
    pub verb: String,
    #[serde(default)]
    pub params: Params,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_success: Option<Vec<BranchStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<Vec<BranchStep>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEdge {
    /// Optional on input; derived from the endpoints when missing.
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub source_handle: Option<String>,
}

/// A trait for data models that can be converted into a `FlowGraph`.
///
/// Conversion is structural only: ids must be unique and verbs and handles must be
/// known, but graph invariants are left to [`FlowGraph::validate`] so that callers
/// can report or repair them.
pub trait IntoFlow {
    fn into_flow(self) -> Result<FlowGraph, DocumentError>;
}

impl IntoFlow for FlowDocument {
    fn into_flow(self) -> Result<FlowGraph, DocumentError> {
        let mut graph = FlowGraph::new();

        for raw in self.nodes {
            if graph.node(&raw.id).is_some() {
                return Err(DocumentError::DuplicateNodeId(raw.id));
            }
            let verb = raw
                .data
                .verb
                .parse::<Verb>()
                .map_err(|_| DocumentError::UnknownVerb {
                    node_id: raw.id.clone(),
                    verb: raw.data.verb.clone(),
                })?;
            let label = raw.data.label.unwrap_or_else(|| verb.default_label());
            graph.insert_node_unchecked(Node {
                id: raw.id,
                verb,
                label,
                params: raw.data.params,
                on_success: raw.data.on_success,
                on_failure: raw.data.on_failure,
                position: raw.position,
            });
        }

        // Explicit ids are claimed first so a derived id never takes a name
        // declared later in the document.
        let mut unnamed = Vec::new();
        for mut raw in self.edges {
            match raw.id.take() {
                Some(id) => insert_document_edge(&mut graph, id, raw)?,
                None => unnamed.push(raw),
            }
        }
        for raw in unnamed {
            let hint =
                Branch::from_handle(raw.source_handle.as_deref()).unwrap_or(Branch::Default);
            let id = graph.fresh_edge_id(&raw.source, &raw.target, hint);
            insert_document_edge(&mut graph, id, raw)?;
        }

        Ok(graph)
    }
}

fn insert_document_edge(
    graph: &mut FlowGraph,
    id: String,
    raw: DocumentEdge,
) -> Result<(), DocumentError> {
    let Some(branch) = Branch::from_handle(raw.source_handle.as_deref()) else {
        return Err(DocumentError::UnknownHandle {
            edge_id: id,
            handle: raw.source_handle.unwrap_or_default(),
        });
    };
    if graph.contains_edge(&id) {
        return Err(DocumentError::DuplicateEdgeId(id));
    }
    graph.insert_edge_unchecked(Edge {
        id,
        source: raw.source,
        target: raw.target,
        branch,
        animated: raw.animated,
    });
    Ok(())
}

impl From<&FlowGraph> for FlowDocument {
    fn from(graph: &FlowGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| DocumentNode {
                id: node.id.clone(),
                position: node.position.clone(),
                data: DocumentNodeData {
                    label: Some(node.label.clone()),
                    verb: node.verb.as_str().to_string(),
                    params: node.params.clone(),
                    on_success: node.on_success.clone(),
                    on_failure: node.on_failure.clone(),
                },
            })
            .collect();
        let edges = graph
            .edges()
            .map(|edge| DocumentEdge {
                id: Some(edge.id.clone()),
                source: edge.source.clone(),
                target: edge.target.clone(),
                animated: edge.animated,
                source_handle: edge.branch.handle().map(str::to_string),
            })
            .collect();
        FlowDocument { nodes, edges }
    }
}

impl FlowDocument {
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        serde_json::from_value(value).map_err(|e| DocumentError::Json(e.to_string()))
    }
}

impl FlowGraph {
    /// Produces the canonical document tree for this graph.
    pub fn serialize(&self) -> Value {
        // A document built from owned strings and JSON maps always serializes.
        serde_json::to_value(FlowDocument::from(self)).unwrap_or(Value::Null)
    }

    /// Reads a graph from a canonical document tree.
    pub fn deserialize(document: Value) -> Result<FlowGraph, DocumentError> {
        FlowDocument::from_value(document)?.into_flow()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&FlowDocument::from(self)).unwrap_or_default()
    }

    pub fn from_json_str(json: &str) -> Result<FlowGraph, DocumentError> {
        let document: FlowDocument =
            serde_json::from_str(json).map_err(|e| DocumentError::Json(e.to_string()))?;
        document.into_flow()
    }
}
