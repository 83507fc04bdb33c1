use crate::flow::{FlowGraph, Subject, Violation, ViolationKind};

/// Drops every edge reported as dangling. Returns the ids of the dropped edges.
///
/// Repair never adds nodes or edges; whatever else is wrong is left for the caller
/// to report.
pub(super) fn drop_dangling_edges(graph: &mut FlowGraph, violations: &[Violation]) -> Vec<String> {
    violations
        .iter()
        .filter(|v| v.kind == ViolationKind::DanglingEdge)
        .filter_map(|v| match &v.subject {
            Subject::Edge(id) => graph.remove_edge(id).ok().map(|e| e.id),
            _ => None,
        })
        .collect()
}
