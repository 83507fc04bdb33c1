//! Structured, atomic edits to a `FlowGraph`.
//!
//! Every edit either applies completely or leaves the flow exactly as it was, so
//! a caller can always re-render the current graph after an error.

use crate::error::{EditError, FlowError};
use crate::flow::{Branch, ConnectPolicy, Edge, EdgeId, FlowGraph, Node, NodeId, Position};
use crate::verb::{Params, Verb};

mod fragments;

/// A single user-driven change to a flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// A verb dropped from the palette onto the canvas.
    PlaceNode { verb: Verb, position: Position },
    Connect {
        source: NodeId,
        target: NodeId,
        branch: Branch,
        policy: ConnectPolicy,
    },
    /// Raw text from the node configuration form.
    EditNode {
        node_id: NodeId,
        params: String,
        on_success: String,
        on_failure: String,
    },
    MoveNode { node_id: NodeId, position: Position },
    RemoveConnection { edge_id: EdgeId },
    RemoveNode { node_id: NodeId },
}

/// What an applied edit did.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    NodePlaced(NodeId),
    Connected(EdgeId),
    NodeEdited(NodeId),
    NodeMoved(NodeId),
    ConnectionRemoved(Edge),
    NodeRemoved { node: Node, edges: Vec<Edge> },
}

/// Owns a flow for the length of an editing session and applies edits one at a time.
#[derive(Debug, Clone, Default)]
pub struct FlowEditor {
    graph: FlowGraph,
}

impl FlowEditor {
    pub fn new(graph: FlowGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn into_graph(self) -> FlowGraph {
        self.graph
    }

    /// Swaps in a whole new flow, e.g. a freshly generated one. Returns the old flow.
    pub fn replace_graph(&mut self, graph: FlowGraph) -> FlowGraph {
        std::mem::replace(&mut self.graph, graph)
    }

    pub fn apply(&mut self, edit: Edit) -> Result<EditOutcome, EditError> {
        let result = match edit {
            Edit::PlaceNode { verb, position } => {
                self.place_node(verb, position).map(EditOutcome::NodePlaced)
            }
            Edit::Connect {
                source,
                target,
                branch,
                policy,
            } => self
                .connect_with(&source, &target, branch, policy)
                .map(EditOutcome::Connected),
            Edit::EditNode {
                node_id,
                params,
                on_success,
                on_failure,
            } => self
                .edit_node(&node_id, &params, &on_success, &on_failure)
                .map(|()| EditOutcome::NodeEdited(node_id)),
            Edit::MoveNode { node_id, position } => self
                .move_node(&node_id, position)
                .map(|()| EditOutcome::NodeMoved(node_id)),
            Edit::RemoveConnection { edge_id } => self
                .remove_connection(&edge_id)
                .map(EditOutcome::ConnectionRemoved),
            Edit::RemoveNode { node_id } => self
                .remove_node(&node_id)
                .map(|(node, edges)| EditOutcome::NodeRemoved { node, edges }),
        };
        if let Err(e) = &result {
            tracing::warn!(error = %e, "edit rejected");
        }
        result
    }

    /// Creates a node for `verb` with its default label and empty params.
    pub fn place_node(&mut self, verb: Verb, position: Position) -> Result<NodeId, EditError> {
        Ok(self.graph.add_node_at(verb, Params::new(), position)?)
    }

    /// Connects two nodes, refusing to overwrite an already wired branch.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        branch: Branch,
    ) -> Result<EdgeId, EditError> {
        self.connect_with(source, target, branch, ConnectPolicy::Reject)
    }

    pub fn connect_with(
        &mut self,
        source: &str,
        target: &str,
        branch: Branch,
        policy: ConnectPolicy,
    ) -> Result<EdgeId, EditError> {
        Ok(self.graph.connect(source, target, branch, policy)?)
    }

    /// Applies the three raw JSON fields of the node form.
    ///
    /// All fragments are parsed before anything changes. On success the node's params
    /// and inline branches are replaced wholesale; keys missing from `params` are gone.
    pub fn edit_node(
        &mut self,
        node_id: &str,
        params: &str,
        on_success: &str,
        on_failure: &str,
    ) -> Result<(), EditError> {
        if self.graph.node(node_id).is_none() {
            return Err(FlowError::UnknownNode(node_id.to_string()).into());
        }
        let parsed = fragments::parse_edit(node_id, params, on_success, on_failure)?;

        self.graph.update_node_params(node_id, parsed.params)?;
        self.graph
            .update_node_branches(node_id, Some(parsed.on_success), Some(parsed.on_failure))?;
        tracing::debug!(node_id, "node edited");
        Ok(())
    }

    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<(), EditError> {
        Ok(self.graph.move_node(node_id, position)?)
    }

    pub fn remove_connection(&mut self, edge_id: &str) -> Result<Edge, EditError> {
        Ok(self.graph.remove_edge(edge_id)?)
    }

    /// Removes a node together with every edge that touches it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<(Node, Vec<Edge>), EditError> {
        Ok(self.graph.remove_node(node_id)?)
    }
}

/// Functional form of [`FlowEditor::apply`]: consumes a flow and hands back either the
/// edited flow or the untouched flow together with the error.
pub fn apply_edit(
    graph: FlowGraph,
    edit: Edit,
) -> Result<(FlowGraph, EditOutcome), (FlowGraph, EditError)> {
    let mut editor = FlowEditor::new(graph);
    match editor.apply(edit) {
        Ok(outcome) => Ok((editor.into_graph(), outcome)),
        Err(e) => Err((editor.into_graph(), e)),
    }
}

impl From<FlowGraph> for FlowEditor {
    fn from(graph: FlowGraph) -> Self {
        Self::new(graph)
    }
}
