//! Node definitions - questions, options, and endpoints of the decision graph.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Unique identifier for nodes in a flowchart.
///
/// Identifiers are operator-visible strings: generated ones follow the
/// `node_<n>` convention, and they double as display text in authoring
/// surfaces (e.g. the "next node" picker).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node ID from an arbitrary string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create the conventional generated ID `node_<n>`.
    pub fn numbered(n: usize) -> Self {
        Self(format!("node_{}", n))
    }

    /// View the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a node accepts exactly one or many option choices before advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Choosing an option is final and advances immediately.
    #[default]
    Single,
    /// Options toggle a pending set; advancing requires an explicit confirm.
    Multiple,
}

/// A selectable answer on a node, optionally pointing to a next node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOption {
    /// Label shown to the user.
    pub text: String,

    /// Target node, or `None` for "no transition" (terminal by omission).
    pub next_node_id: Option<NodeId>,
}

impl NodeOption {
    /// Create an option with no transition.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_node_id: None,
        }
    }

    /// Create an option that leads to another node.
    pub fn leading_to(text: impl Into<String>, target: NodeId) -> Self {
        Self {
            text: text.into(),
            next_node_id: Some(target),
        }
    }
}

/// A single question or endpoint step in the decision graph.
///
/// Field names serialize in camelCase so saved graphs are structurally
/// identical to the shape the authoring clients persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: NodeId,

    /// Question shown to the user; empty for pure endpoints.
    #[serde(default)]
    pub question: String,

    #[serde(default)]
    pub selection_mode: SelectionMode,

    /// Ordered mapping from option key (`option1`, `option2`, ...) to option.
    #[serde(default)]
    pub options: IndexMap<String, NodeOption>,

    #[serde(default)]
    pub is_endpoint: bool,

    /// Final outcome message; present only on endpoints.
    pub endpoint_message: Option<String>,
}

impl FlowNode {
    /// Create an empty single-selection question node.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            question: String::new(),
            selection_mode: SelectionMode::Single,
            options: IndexMap::new(),
            is_endpoint: false,
            endpoint_message: None,
        }
    }

    /// Set the question text.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    /// Set the selection mode.
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Add an option under the given key, preserving insertion order.
    pub fn with_option(mut self, key: impl Into<String>, option: NodeOption) -> Self {
        self.options.insert(key.into(), option);
        self
    }

    /// Mark this node as an endpoint carrying the given outcome message.
    pub fn endpoint(mut self, message: impl Into<String>) -> Self {
        self.is_endpoint = true;
        self.endpoint_message = Some(message.into());
        self
    }

    /// Look up an option by key.
    pub fn option(&self, key: &str) -> Option<&NodeOption> {
        self.options.get(key)
    }

    /// The lowest unused `option<n>` key, recomputed from current state.
    pub fn next_option_key(&self) -> String {
        let mut n = 1;
        loop {
            let candidate = format!("option{}", n);
            if !self.options.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Field values for creating or replacing a node; the identifier is excluded
/// because the store owns identifier assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDraft {
    pub question: String,

    /// Defaults to [`SelectionMode::Single`] when unspecified.
    pub selection_mode: Option<SelectionMode>,

    pub options: IndexMap<String, NodeOption>,

    pub is_endpoint: bool,

    pub endpoint_message: Option<String>,
}

impl NodeDraft {
    /// Create a draft question node.
    pub fn question(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    /// Set the selection mode.
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = Some(mode);
        self
    }

    /// Add an option under the given key.
    pub fn with_option(mut self, key: impl Into<String>, option: NodeOption) -> Self {
        self.options.insert(key.into(), option);
        self
    }

    /// Create a draft endpoint carrying the given outcome message.
    pub fn endpoint(message: impl Into<String>) -> Self {
        Self {
            is_endpoint: true,
            endpoint_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Build the node this draft describes under the given identifier.
    pub fn into_node(self, id: NodeId) -> FlowNode {
        FlowNode {
            id,
            question: self.question,
            selection_mode: self.selection_mode.unwrap_or_default(),
            options: self.options,
            is_endpoint: self.is_endpoint,
            endpoint_message: self.endpoint_message,
        }
    }
}
