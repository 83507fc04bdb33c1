use crate::verb::{Params, Role, Verb};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

pub type NodeId = String;
pub type EdgeId = String;

/// Which continuation of a node an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Success,
    Failure,
    /// The single unconditional continuation of a verb that does not distinguish outcomes.
    Default,
}

impl Branch {
    /// The `sourceHandle` value used in flow documents. `Default` has no handle.
    pub fn handle(&self) -> Option<&'static str> {
        match self {
            Branch::Success => Some("success"),
            Branch::Failure => Some("failure"),
            Branch::Default => None,
        }
    }

    /// Parses a `sourceHandle`. Returns `None` for handles that name no branch.
    pub fn from_handle(handle: Option<&str>) -> Option<Self> {
        match handle {
            None | Some("default") => Some(Branch::Default),
            Some("success") => Some(Branch::Success),
            Some("failure") => Some(Branch::Failure),
            Some(_) => None,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Success => write!(f, "success"),
            Branch::Failure => write!(f, "failure"),
            Branch::Default => write!(f, "default"),
        }
    }
}

/// Display payload owned by the rendering side. Carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(Value);

impl Position {
    pub fn at(x: f64, y: f64) -> Self {
        Position(json!({ "x": x, "y": y }))
    }

    pub fn from_value(value: Value) -> Self {
        Position(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::at(0.0, 0.0)
    }
}

/// One step of an inline `onSuccess` / `onFailure` branch list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchStep {
    pub verb: Verb,
    #[serde(default)]
    pub params: Params,
}

/// A single call-handling step in a flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub verb: Verb,
    pub label: String,
    pub params: Params,
    pub on_success: Option<Vec<BranchStep>>,
    pub on_failure: Option<Vec<BranchStep>>,
    pub position: Position,
}

impl Node {
    /// Creates a node with the verb's default label, empty params and no inline branches.
    pub fn new(id: impl Into<NodeId>, verb: Verb) -> Self {
        Self {
            id: id.into(),
            verb,
            label: verb.default_label(),
            params: Params::new(),
            on_success: None,
            on_failure: None,
            position: Position::default(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn role(&self) -> Role {
        self.verb.role()
    }
}

/// A directed connection from one node's branch to another node.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub branch: Branch,
    pub animated: bool,
}

impl Edge {
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
