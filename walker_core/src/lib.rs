//! # Walker Core (Wayfinder)
//!
//! The engine crate of Wayfinder. This crate interfaces with `flow_model`,
//! walks decision graphs under user choices, records the path taken, and
//! reports the final outcomes.
//!
//! ## Core Components
//!
//! - **session**: the traversal state machine over an explicit session value
//! - **report**: presentation-only transcripts, summaries, and export naming
//! - **persistence**: the load/save collaborator boundary and its stores
//! - **authoring**: structural edits with the persist-after-mutation side effect
//!
//! ## Design Philosophy
//!
//! - **Value-Driven**: sessions are plain values passed through explicit
//!   operations, so every transition is deterministic and testable
//! - **Lenient Graphs**: a dangling reference behaves like "no transition";
//!   integrity damage surfaces as a completed walk, never a crash
//! - **Local Failure Handling**: persistence failures raise a flag and a
//!   warning, roll nothing back, and are never retried automatically

pub mod authoring;
pub mod persistence;
pub mod report;
pub mod session;

pub use authoring::*;
pub use persistence::*;
pub use report::*;
pub use session::*;
