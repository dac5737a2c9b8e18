//! Authoring orchestration - structural edits plus the persistence side
//! effect after every mutation.
//!
//! Edits are two-phase: the mutation is applied to the in-memory graph,
//! then a save is attempted. A failed save never rolls the mutation back
//! and is never retried automatically; it raises the unsaved-changes flag
//! so callers can surface the divergence and re-attempt with
//! [`Editor::save`]. Validation failures propagate before anything
//! mutates, so no save is attempted for them.

use flow_model::{Flowchart, GraphError, NodeDraft, NodeId};
use tracing::{debug, warn};

use crate::persistence::{FlowStore, OwnerId, StoreError};

/// The authoring surface for a single owner's flowchart.
#[derive(Debug)]
pub struct Editor<S: FlowStore> {
    owner: OwnerId,
    chart: Flowchart,
    store: S,
    dirty: bool,
}

impl<S: FlowStore> Editor<S> {
    /// Load the owner's saved graph, falling back to the built-in default
    /// investigation when none exists yet.
    pub fn load_or_default(store: S, owner: OwnerId) -> Result<Self, StoreError> {
        let chart = match store.load(owner)? {
            Some(chart) => chart,
            None => {
                debug!(%owner, "no saved flowchart; starting from the default investigation");
                Flowchart::default_investigation()
            }
        };
        Ok(Self {
            owner,
            chart,
            store,
            dirty: false,
        })
    }

    /// The owner this editor works on behalf of.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// The current in-memory graph.
    pub fn chart(&self) -> &Flowchart {
        &self.chart
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the in-memory graph has diverged from the backing store
    /// because the latest save failed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Add a node under a freshly generated identifier and persist.
    pub fn add_node(&mut self, draft: NodeDraft) -> NodeId {
        let id = self.chart.add_node(draft);
        self.persist();
        id
    }

    /// Replace an existing node's fields and persist.
    pub fn update_node(&mut self, id: &NodeId, draft: NodeDraft) -> Result<(), GraphError> {
        self.chart.update_node(id, draft)?;
        self.persist();
        Ok(())
    }

    /// Delete a node (start node protected) and persist.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<(), GraphError> {
        self.chart.delete_node(id)?;
        self.persist();
        Ok(())
    }

    /// Append an empty option to a node and persist. Returns the new key.
    pub fn add_option(&mut self, id: &NodeId) -> Result<String, GraphError> {
        let key = self.chart.add_option(id)?;
        self.persist();
        Ok(key)
    }

    /// Remove an option (two-option floor enforced) and persist.
    pub fn remove_option(&mut self, id: &NodeId, key: &str) -> Result<(), GraphError> {
        self.chart.remove_option(id, key)?;
        self.persist();
        Ok(())
    }

    /// Update an option's label and persist.
    pub fn set_option_text(
        &mut self,
        id: &NodeId,
        key: &str,
        text: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.chart.set_option_text(id, key, text)?;
        self.persist();
        Ok(())
    }

    /// Update an option's target and persist.
    pub fn set_option_target(
        &mut self,
        id: &NodeId,
        key: &str,
        target: Option<NodeId>,
    ) -> Result<(), GraphError> {
        self.chart.set_option_target(id, key, target)?;
        self.persist();
        Ok(())
    }

    /// Re-attempt persistence explicitly; clears the unsaved-changes flag
    /// on success.
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.store.save(self.owner, &self.chart)?;
        self.dirty = false;
        Ok(())
    }

    fn persist(&mut self) {
        match self.store.save(self.owner, &self.chart) {
            Ok(()) => self.dirty = false,
            Err(err) => {
                warn!(
                    owner = %self.owner,
                    error = %err,
                    "failed to persist flowchart; in-memory changes kept"
                );
                self.dirty = true;
            }
        }
    }
}
