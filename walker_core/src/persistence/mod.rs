//! Persistence boundary - the collaborator that loads and saves flowcharts.
//!
//! The store is opaque to the engine. `load` returning `Ok(None)` is the
//! normal first-time outcome and is kept distinct from transport errors;
//! `save` is an idempotent create-or-replace of the owner's full graph.
//! Failures here never roll back in-memory state - callers surface them
//! and carry on locally (see [`crate::authoring::Editor`]).

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use flow_model::Flowchart;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for the owner of a saved flowchart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub Uuid);

impl OwnerId {
    /// Create a new random owner ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an owner ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a nil/empty owner ID (useful for defaults).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from the persistence collaborator. A missing graph is not an
/// error: it is the `Ok(None)` load result.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored payload could not be (de)serialized.
    #[error("stored flowchart could not be decoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The load/save contract wrapped around the graph store boundary.
pub trait FlowStore {
    /// Fetch the most recently saved graph for the owner; `Ok(None)` when
    /// none has been saved yet.
    fn load(&self, owner: OwnerId) -> Result<Option<Flowchart>, StoreError>;

    /// Create-or-replace the owner's graph. Idempotent.
    fn save(&mut self, owner: OwnerId, chart: &Flowchart) -> Result<(), StoreError>;
}
