//! # Flow Model (The Flow Bible)
//!
//! The data crate of Wayfinder - contains the decision-graph model, the
//! structural authoring rules, and flowchart definitions. This crate is the
//! single source of truth for graph state and does not contain any
//! traversal logic.
//!
//! ## Core Components
//!
//! - **node**: questions, options, and endpoints
//! - **graph**: the node arena, identifier generation, and structural edits
//! - **definition**: TOML/JSON definition loading and the built-in default

pub mod definition;
pub mod graph;
pub mod node;

pub use definition::*;
pub use graph::*;
pub use node::*;
