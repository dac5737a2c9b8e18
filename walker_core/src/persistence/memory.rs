//! In-memory store - holds the same JSON payloads a remote backend would.

use std::collections::HashMap;

use flow_model::Flowchart;

use super::{FlowStore, OwnerId, StoreError};

/// A store backed by a process-local map of serialized graphs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    payloads: HashMap<OwnerId, String>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of owners with a saved graph.
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Whether no graph has been saved yet.
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl FlowStore for MemoryStore {
    fn load(&self, owner: OwnerId) -> Result<Option<Flowchart>, StoreError> {
        match self.payloads.get(&owner) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, owner: OwnerId, chart: &Flowchart) -> Result<(), StoreError> {
        let json = serde_json::to_string(chart)?;
        self.payloads.insert(owner, json);
        Ok(())
    }
}
