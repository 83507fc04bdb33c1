//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the callflow
//! crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use callflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("flows/flow.json")?;
//! let flow = FlowGraph::from_json_str(&json)?;
//! match flow.validate() {
//!     Ok(()) => println!("{}", ViolationFormatter::outline(&flow)),
//!     Err(violations) => println!("{}", ViolationFormatter::format_block(&violations)),
//! }
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::flow::{
    Branch, BranchStep, ConnectPolicy, Edge, FlowDocument, FlowGraph, IntoFlow, Node, Position,
    Subject, Violation, ViolationKind,
};
pub use crate::verb::{Params, Role, Verb, VerbParams};

// Generation and editing
pub use crate::config::GenerationConfig;
pub use crate::editor::{Edit, EditOutcome, FlowEditor};
pub use crate::generation::{CompletionRequest, FlowGenerator, LlmTransport};

// Error types
pub use crate::error::{DocumentError, EditError, FlowError, GenerationError, TransportError};

// Reporting
pub use crate::report::ViolationFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
