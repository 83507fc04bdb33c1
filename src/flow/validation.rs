use super::{FlowGraph, id_order};
use crate::verb::Role;
use ahash::AHashMap;
use itertools::Itertools;
use std::fmt;

/// A broken graph invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// More than one node has the entry role.
    MultipleEntries,
    /// No node has the entry role.
    MissingEntry,
    /// The entry node has no outgoing edge.
    EntryWithoutExit,
    /// An edge references a node that is not in the graph.
    DanglingEdge,
    /// A node has more than one outgoing edge on the same branch.
    BranchConflict,
    /// An edge leaves a terminal node or enters the entry node.
    IllegalEdgeEndpoint,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ViolationKind::MultipleEntries => "more than one entry node",
            ViolationKind::MissingEntry => "no entry node",
            ViolationKind::EntryWithoutExit => "entry node has no outgoing edge",
            ViolationKind::DanglingEdge => "edge references a missing node",
            ViolationKind::BranchConflict => "branch is connected more than once",
            ViolationKind::IllegalEdgeEndpoint => "edge leaves a terminal or enters the entry",
        };
        f.write_str(text)
    }
}

/// What a violation is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    Graph,
    Node(String),
    Edge(String),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Graph => write!(f, "flow"),
            Subject::Node(id) => write!(f, "node '{}'", id),
            Subject::Edge(id) => write!(f, "edge '{}'", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Violation {
    pub kind: ViolationKind,
    pub subject: Subject,
}

impl Violation {
    fn new(kind: ViolationKind, subject: Subject) -> Self {
        Self { kind, subject }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.kind)
    }
}

impl FlowGraph {
    /// Re-checks every graph invariant.
    ///
    /// Violations are reported in a stable order: entry checks first, then per-edge
    /// findings by edge id, then branch conflicts by node id.
    pub fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();

        let entries: Vec<_> = self.nodes().filter(|n| n.role() == Role::Entry).collect();
        match entries.as_slice() {
            [] => violations.push(Violation::new(ViolationKind::MissingEntry, Subject::Graph)),
            [entry] => {
                if self.outgoing(&entry.id).next().is_none() {
                    violations.push(Violation::new(
                        ViolationKind::EntryWithoutExit,
                        Subject::Node(entry.id.clone()),
                    ));
                }
            }
            many => violations.extend(many.iter().map(|n| {
                Violation::new(ViolationKind::MultipleEntries, Subject::Node(n.id.clone()))
            })),
        }

        let mut per_branch: AHashMap<(&str, _), usize> = AHashMap::new();
        for edge in self.edges() {
            let source = self.node(&edge.source);
            let target = self.node(&edge.target);
            let (Some(source), Some(target)) = (source, target) else {
                violations.push(Violation::new(
                    ViolationKind::DanglingEdge,
                    Subject::Edge(edge.id.clone()),
                ));
                continue;
            };
            if source.role() == Role::Terminal || target.role() == Role::Entry {
                violations.push(Violation::new(
                    ViolationKind::IllegalEdgeEndpoint,
                    Subject::Edge(edge.id.clone()),
                ));
            }
            *per_branch
                .entry((edge.source.as_str(), edge.branch))
                .or_default() += 1;
        }

        violations.extend(
            per_branch
                .into_iter()
                .filter(|(_, count)| *count > 1)
                .map(|((node_id, _), _)| node_id)
                .unique()
                .sorted_by(|a, b| id_order(a, b))
                .map(|id| Violation::new(ViolationKind::BranchConflict, Subject::Node(id.to_string()))),
        );

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Convenience over [`FlowGraph::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
