use crate::flow::{Branch, Violation};
use crate::report::ViolationFormatter;
use thiserror::Error;

/// Why a connection was refused by the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchRejection {
    /// The source node is terminal and may not have outgoing edges.
    FromTerminal,
    /// The target node is the entry node and may not have incoming edges.
    IntoEntry,
    /// The source node already has an edge on this branch.
    Occupied,
}

impl std::fmt::Display for BranchRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchRejection::FromTerminal => write!(f, "source is a terminal node"),
            BranchRejection::IntoEntry => write!(f, "target is the entry node"),
            BranchRejection::Occupied => write!(f, "branch is already connected"),
        }
    }
}

/// Errors raised by structural operations on a `FlowGraph`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Unknown verb '{0}'")]
    UnknownVerb(String),

    #[error("Node '{0}' does not exist in this flow")]
    UnknownNode(String),

    #[error("Edge '{0}' does not exist in this flow")]
    UnknownEdge(String),

    #[error("Flow already has an entry node '{existing}'")]
    DuplicateEntry { existing: String },

    #[error("A node with id '{0}' already exists")]
    DuplicateNodeId(String),

    #[error("Cannot connect '{source_id}' to '{target_id}' on {branch} branch: {reason}")]
    InvalidBranch {
        source_id: String,
        target_id: String,
        branch: Branch,
        reason: BranchRejection,
    },
}

/// Errors that can occur while reading a canonical flow document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Failed to parse flow document: {0}")]
    Json(String),

    #[error("Node '{node_id}' uses unknown verb '{verb}'")]
    UnknownVerb { node_id: String, verb: String },

    #[error("Edge '{edge_id}' uses unknown source handle '{handle}'")]
    UnknownHandle { edge_id: String, handle: String },

    #[error("Node id '{0}' appears more than once")]
    DuplicateNodeId(String),

    #[error("Edge id '{0}' appears more than once")]
    DuplicateEdgeId(String),
}

/// Errors reported by an LLM transport.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("LLM provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Could not decode LLM provider response: {0}")]
    Decode(String),
}

/// Errors that can occur while turning a request into a flow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Generation request text is empty")]
    EmptyQuery,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("LLM did not return any content")]
    EmptyResponse,

    #[error("Failed to parse JSON from LLM response: {message}")]
    Parse { raw: String, message: String },

    #[error("LLM response is not a flow document: {source}")]
    Document {
        raw: String,
        #[source]
        source: DocumentError,
    },

    #[error("Generated flow is invalid: {}", ViolationFormatter::format_list(.violations))]
    Schema { violations: Vec<Violation> },
}

/// Errors returned by the editor. A failed edit never changes the flow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Invalid JSON in parameters of node '{node_id}': {message}")]
    ParamsParse { node_id: String, message: String },

    #[error("Invalid JSON in success branch of node '{node_id}': {message}")]
    SuccessBranchParse { node_id: String, message: String },

    #[error("Invalid JSON in failure branch of node '{node_id}': {message}")]
    FailureBranchParse { node_id: String, message: String },

    #[error(transparent)]
    Flow(#[from] FlowError),
}
