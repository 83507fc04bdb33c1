use crate::flow::{FlowGraph, Violation};
use crate::verb::VerbParams;
use itertools::Itertools;

/// Formats validation results and flows into human-readable text.
pub struct ViolationFormatter;

impl ViolationFormatter {
    /// One line, violations separated by `; `.
    pub fn format_list(violations: &[Violation]) -> String {
        violations.iter().map(|v| v.to_string()).join("; ")
    }

    /// One violation per line, prefixed with a bullet.
    pub fn format_block(violations: &[Violation]) -> String {
        violations.iter().map(|v| format!("  - {}", v)).join("\n")
    }

    /// A short outline of a flow: each node with its verb headline and wired branches.
    pub fn outline(graph: &FlowGraph) -> String {
        graph
            .nodes()
            .map(|node| {
                let headline = VerbParams::interpret(node.verb, &node.params)
                    .headline()
                    .map(|h| format!(" {}", h))
                    .unwrap_or_default();
                let exits = graph
                    .outgoing(&node.id)
                    .map(|e| format!("{} -> {}", e.branch, e.target))
                    .join(", ");
                if exits.is_empty() {
                    format!("[{}] {}{}", node.id, node.label, headline)
                } else {
                    format!("[{}] {}{} ({})", node.id, node.label, headline, exits)
                }
            })
            .join("\n")
    }
}
