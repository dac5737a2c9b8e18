//! Flowchart store - the arena of nodes and the structural edit operations.
//!
//! The store owns all node and option data. Invariants:
//! - `start_node_id` must always resolve and can never be deleted.
//! - Dangling `next_node_id` references are tolerated: deleting a node does
//!   not repair options that pointed at it, and traversal treats such a
//!   target the same as "no transition". [`Flowchart::dangling_references`]
//!   reports them for authors without changing behavior.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{FlowNode, NodeDraft, NodeId, NodeOption};

/// Errors reported by structural edits on a flowchart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No node exists at the given identifier.
    #[error("no node found with id `{0}`")]
    NodeNotFound(NodeId),

    /// The start node can never be removed.
    #[error("the start node `{0}` cannot be deleted")]
    StartNodeProtected(NodeId),

    /// A node must keep at least two options.
    #[error("node `{0}` must keep at least two options")]
    TooFewOptions(NodeId),

    /// No option exists at the given key on the node.
    #[error("node `{0}` has no option `{1}`")]
    OptionNotFound(NodeId, String),

    /// The start pointer does not resolve to a node.
    #[error("start node `{0}` is missing from the graph")]
    StartNodeMissing(NodeId),
}

/// A complete decision graph: a start pointer plus an arena of nodes keyed
/// by identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flowchart {
    start_node_id: NodeId,
    nodes: HashMap<NodeId, FlowNode>,
}

impl Flowchart {
    /// Create a flowchart whose start node is the given node.
    pub fn new(start_node: FlowNode) -> Self {
        let start_node_id = start_node.id.clone();
        let mut nodes = HashMap::new();
        nodes.insert(start_node_id.clone(), start_node);
        Self {
            start_node_id,
            nodes,
        }
    }

    /// The identifier of the start node.
    pub fn start_node_id(&self) -> &NodeId {
        &self.start_node_id
    }

    /// The start node itself.
    pub fn start_node(&self) -> Option<&FlowNode> {
        self.nodes.get(&self.start_node_id)
    }

    /// Get a node by identifier.
    pub fn node(&self, id: &NodeId) -> Option<&FlowNode> {
        self.nodes.get(id)
    }

    /// Check whether a node exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes.
    pub fn all_nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.nodes.values()
    }

    /// Iterate over all node identifiers.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// The lowest-numbered `node_<n>` identifier not already present.
    ///
    /// Recomputed from current state on every call, never cached, so ids
    /// freed by deletions are reused before new numbers are minted.
    pub fn generate_node_id(&self) -> NodeId {
        let mut n = 1;
        loop {
            let candidate = NodeId::numbered(n);
            if !self.nodes.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Insert a fully built node under its own identifier, replacing any
    /// node already there. Definition loading and tests use this; interactive
    /// authoring goes through [`Flowchart::add_node`] instead.
    pub fn insert_node(&mut self, node: FlowNode) -> NodeId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Insert a new node built from the draft under a freshly generated
    /// identifier. Returns the identifier of the created node.
    pub fn add_node(&mut self, draft: NodeDraft) -> NodeId {
        let id = self.generate_node_id();
        self.nodes.insert(id.clone(), draft.into_node(id.clone()));
        id
    }

    /// Replace the question/options/mode/endpoint fields of an existing
    /// node, preserving its identifier.
    pub fn update_node(&mut self, id: &NodeId, draft: NodeDraft) -> Result<(), GraphError> {
        if !self.nodes.contains_key(id) {
            return Err(GraphError::NodeNotFound(id.clone()));
        }
        self.nodes.insert(id.clone(), draft.into_node(id.clone()));
        Ok(())
    }

    /// Remove a node. The start node is protected; options elsewhere that
    /// pointed at the removed node are left dangling on purpose.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<FlowNode, GraphError> {
        if *id == self.start_node_id {
            return Err(GraphError::StartNodeProtected(id.clone()));
        }
        self.nodes
            .remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    /// Append an empty option to a node under the next free `option<n>` key.
    /// Returns the key of the created option.
    pub fn add_option(&mut self, id: &NodeId) -> Result<String, GraphError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        let key = node.next_option_key();
        node.options.insert(key.clone(), NodeOption::new(""));
        Ok(key)
    }

    /// Remove an option from a node, refusing to drop below two options.
    pub fn remove_option(&mut self, id: &NodeId, key: &str) -> Result<NodeOption, GraphError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        if !node.options.contains_key(key) {
            return Err(GraphError::OptionNotFound(id.clone(), key.to_string()));
        }
        if node.options.len() <= 2 {
            return Err(GraphError::TooFewOptions(id.clone()));
        }
        // shift_remove keeps the remaining options in display order.
        node.options
            .shift_remove(key)
            .ok_or_else(|| GraphError::OptionNotFound(id.clone(), key.to_string()))
    }

    /// Update the label of a single option in place.
    pub fn set_option_text(
        &mut self,
        id: &NodeId,
        key: &str,
        text: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.option_mut(id, key)?.text = text.into();
        Ok(())
    }

    /// Update the target of a single option in place. `None` means "no
    /// transition"; targets are not checked against existing nodes.
    pub fn set_option_target(
        &mut self,
        id: &NodeId,
        key: &str,
        target: Option<NodeId>,
    ) -> Result<(), GraphError> {
        self.option_mut(id, key)?.next_node_id = target;
        Ok(())
    }

    fn option_mut(&mut self, id: &NodeId, key: &str) -> Result<&mut NodeOption, GraphError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;
        node.options
            .get_mut(key)
            .ok_or_else(|| GraphError::OptionNotFound(id.clone(), key.to_string()))
    }

    /// Check the only hard invariant: the start pointer must resolve.
    pub fn validate(&self) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&self.start_node_id) {
            return Err(GraphError::StartNodeMissing(self.start_node_id.clone()));
        }
        Ok(())
    }

    /// Advisory report of options whose targets no longer resolve, as
    /// `(node id, option key, missing target)` triples. Never repaired
    /// automatically; traversal treats these targets as "no node found".
    pub fn dangling_references(&self) -> Vec<(NodeId, String, NodeId)> {
        let mut dangling = Vec::new();
        for node in self.nodes.values() {
            for (key, option) in &node.options {
                if let Some(target) = &option.next_node_id {
                    if !self.nodes.contains_key(target) {
                        dangling.push((node.id.clone(), key.clone(), target.clone()));
                    }
                }
            }
        }
        dangling
    }
}
