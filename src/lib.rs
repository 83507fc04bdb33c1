//! # callflow - Call-Control Flow Graphs
//!
//! **callflow** models telephony call flows as directed graphs of call-control
//! verbs (`accept`, `play`, `gather`, `dial`, `hangup`, ...) with success/failure
//! branching. Flows can be built by hand, generated from a natural-language
//! request through an LLM, and edited incrementally without ever breaking the
//! graph's invariants.
//!
//! ## Core Workflow
//!
//! 1.  **Generate or load**: Use a [`generation::FlowGenerator`] with any
//!     [`generation::LlmTransport`] to turn a request into a validated flow, or read
//!     a canonical document with [`flow::FlowGraph::deserialize`].
//! 2.  **Edit**: Hand the flow to a [`editor::FlowEditor`] and apply placements,
//!     connections and node edits. A failed edit leaves the flow untouched.
//! 3.  **Validate and save**: Call [`flow::FlowGraph::validate`] before handing the
//!     flow to a renderer or storage, then [`flow::FlowGraph::serialize`] it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use callflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut editor = FlowEditor::default();
//!     let accept = editor.place_node(Verb::Accept, Position::at(50.0, 50.0))?;
//!     let play = editor.place_node(Verb::Play, Position::at(250.0, 50.0))?;
//!     editor.edit_node(&play, r#"{ "media": "sound:hello-world" }"#, "[]", "[]")?;
//!     editor.connect(&accept, &play, Branch::Default)?;
//!
//!     let flow = editor.into_graph();
//!     if let Err(violations) = flow.validate() {
//!         eprintln!("{}", ViolationFormatter::format_block(&violations));
//!     }
//!     println!("{}", flow.to_json_pretty());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod flow;
pub mod generation;
pub mod prelude;
pub mod report;
pub mod verb;
