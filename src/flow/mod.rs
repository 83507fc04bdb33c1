//! The canonical in-memory call flow: nodes, edges and the invariants between them.

use crate::error::{BranchRejection, FlowError};
use crate::verb::{Params, Role, Verb};
use ahash::AHashMap;
use itertools::Itertools;
use std::cmp::Ordering;

pub mod document;
mod node;
pub mod validation;

pub use document::{FlowDocument, IntoFlow};
pub use node::{Branch, BranchStep, Edge, EdgeId, Node, NodeId, Position};
pub use validation::{Subject, Violation, ViolationKind};

/// What to do when a connection lands on a branch that is already wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectPolicy {
    /// Refuse the new edge with `FlowError::InvalidBranch`.
    #[default]
    Reject,
    /// Remove the existing edge on that branch, then add the new one.
    Replace,
}

/// A call flow graph.
///
/// Nodes and edges are keyed by id. Every mutating operation either succeeds
/// completely or leaves the graph untouched.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    nodes: AHashMap<NodeId, Node>,
    edges: AHashMap<EdgeId, Edge>,
    next_node_seq: u64,
}

impl PartialEq for FlowGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

/// Orders ids so that numeric ids sort naturally ("2" before "10").
pub(crate) fn id_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// All nodes, ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().sorted_by(|a, b| id_order(&a.id, &b.id))
    }

    /// All edges, ordered by id.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().sorted_by(|a, b| id_order(&a.id, &b.id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The entry node, if there is one. With several entries the lowest id wins.
    pub fn entry(&self) -> Option<&Node> {
        self.nodes().find(|n| n.role() == Role::Entry)
    }

    /// Outgoing edges of `node_id`, ordered by id.
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges().filter(move |e| e.source == node_id)
    }

    /// Incoming edges of `node_id`, ordered by id.
    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges().filter(move |e| e.target == node_id)
    }

    /// The edge leaving `node_id` on `branch`, if wired.
    pub fn branch_edge(&self, node_id: &str, branch: Branch) -> Option<&Edge> {
        self.edges
            .values()
            .find(|e| e.source == node_id && e.branch == branch)
    }

    /// Adds a node with a generated id at the default position.
    pub fn add_node(&mut self, verb: Verb, params: Params) -> Result<NodeId, FlowError> {
        self.add_node_at(verb, params, Position::default())
    }

    /// Adds a node with a generated id. Fails with `DuplicateEntry` for a second entry verb.
    pub fn add_node_at(
        &mut self,
        verb: Verb,
        params: Params,
        position: Position,
    ) -> Result<NodeId, FlowError> {
        let id = self.fresh_node_id();
        self.insert_node(
            Node::new(id, verb)
                .with_params(params)
                .with_position(position),
        )
    }

    /// Adds a fully built node, keeping its id.
    pub fn insert_node(&mut self, node: Node) -> Result<NodeId, FlowError> {
        if self.nodes.contains_key(&node.id) {
            return Err(FlowError::DuplicateNodeId(node.id));
        }
        if node.role() == Role::Entry {
            if let Some(existing) = self.entry() {
                return Err(FlowError::DuplicateEntry {
                    existing: existing.id.clone(),
                });
            }
        }
        let id = node.id.clone();
        tracing::debug!(node_id = %id, verb = %node.verb, "node added");
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Connects `source` to `target` on `branch`, rejecting an occupied branch.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        branch: Branch,
    ) -> Result<EdgeId, FlowError> {
        self.connect(source, target, branch, ConnectPolicy::Reject)
    }

    /// Connects `source` to `target` on `branch` under the given policy.
    ///
    /// Fails with `UnknownNode` if either endpoint is absent, and with `InvalidBranch`
    /// if the source is terminal, the target is the entry node, or the branch is
    /// occupied and the policy is `Reject`.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        branch: Branch,
        policy: ConnectPolicy,
    ) -> Result<EdgeId, FlowError> {
        let source_node = self
            .nodes
            .get(source)
            .ok_or_else(|| FlowError::UnknownNode(source.to_string()))?;
        let target_node = self
            .nodes
            .get(target)
            .ok_or_else(|| FlowError::UnknownNode(target.to_string()))?;

        let reject = |reason| FlowError::InvalidBranch {
            source_id: source.to_string(),
            target_id: target.to_string(),
            branch,
            reason,
        };

        if source_node.role() == Role::Terminal {
            return Err(reject(BranchRejection::FromTerminal));
        }
        if target_node.role() == Role::Entry {
            return Err(reject(BranchRejection::IntoEntry));
        }

        let occupied = self.branch_edge(source, branch).map(|e| e.id.clone());
        if let Some(existing) = occupied {
            match policy {
                ConnectPolicy::Reject => return Err(reject(BranchRejection::Occupied)),
                ConnectPolicy::Replace => {
                    tracing::debug!(edge_id = %existing, %branch, "replacing branch edge");
                    self.edges.remove(&existing);
                }
            }
        }

        let id = self.fresh_edge_id(source, target, branch);
        self.insert_edge_unchecked(Edge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            branch,
            animated: true,
        });
        Ok(id)
    }

    /// Removes a node and every edge that references it.
    pub fn remove_node(&mut self, id: &str) -> Result<(Node, Vec<Edge>), FlowError> {
        let node = self
            .nodes
            .remove(id)
            .ok_or_else(|| FlowError::UnknownNode(id.to_string()))?;
        let doomed: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| e.touches(id))
            .map(|e| e.id.clone())
            .collect();
        let removed: Vec<Edge> = doomed
            .iter()
            .filter_map(|edge_id| self.edges.remove(edge_id))
            .sorted_by(|a, b| id_order(&a.id, &b.id))
            .collect();
        tracing::debug!(node_id = %id, edges = removed.len(), "node removed");
        Ok((node, removed))
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, FlowError> {
        self.edges
            .remove(id)
            .ok_or_else(|| FlowError::UnknownEdge(id.to_string()))
    }

    /// Replaces a node's parameter mapping wholesale.
    pub fn update_node_params(&mut self, id: &str, params: Params) -> Result<(), FlowError> {
        let node = self.node_mut(id)?;
        node.params = params;
        Ok(())
    }

    /// Replaces a node's inline `onSuccess` / `onFailure` step lists.
    pub fn update_node_branches(
        &mut self,
        id: &str,
        on_success: Option<Vec<BranchStep>>,
        on_failure: Option<Vec<BranchStep>>,
    ) -> Result<(), FlowError> {
        let node = self.node_mut(id)?;
        node.on_success = on_success;
        node.on_failure = on_failure;
        Ok(())
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> Result<(), FlowError> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node, FlowError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| FlowError::UnknownNode(id.to_string()))
    }

    /// Inserts a node without any invariant checks. Used when reading documents,
    /// which are validated separately.
    pub(crate) fn insert_node_unchecked(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub(crate) fn insert_edge_unchecked(&mut self, edge: Edge) {
        self.edges.insert(edge.id.clone(), edge);
    }

    pub(crate) fn contains_edge(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    /// Next numeric id not already taken.
    fn fresh_node_id(&mut self) -> NodeId {
        loop {
            self.next_node_seq += 1;
            let candidate = self.next_node_seq.to_string();
            if !self.nodes.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// `e<source>-<target>`, suffixed by branch and then a counter until unique.
    pub(crate) fn fresh_edge_id(&self, source: &str, target: &str, branch: Branch) -> EdgeId {
        let base = match branch.handle() {
            Some(handle) => format!("e{}-{}-{}", source, target, handle),
            None => format!("e{}-{}", source, target),
        };
        if !self.edges.contains_key(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !self.edges.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}
