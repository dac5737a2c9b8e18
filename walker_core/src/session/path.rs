//! Path history - the record of one traversal step per confirmed choice.

use chrono::{DateTime, Utc};
use flow_model::{NodeId, SelectionMode};
use serde::{Deserialize, Serialize};

/// The recorded record of one traversal step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathEntry {
    /// Node the step was answered on.
    pub node_id: NodeId,

    /// Question text at that step.
    pub question: String,

    /// Selected option keys, in selection order.
    pub selected_options: Vec<String>,

    /// Selected option labels, ordered the same as the keys.
    pub selected_texts: Vec<String>,

    /// First selected label, kept for single-selection consumers.
    pub selected_text: String,

    /// The node's selection mode at that step.
    pub selection_mode: SelectionMode,

    pub timestamp: DateTime<Utc>,
}

impl PathEntry {
    /// One-line summary of the choices made at this step.
    pub fn summary(&self) -> String {
        self.selected_texts.join(", ")
    }
}
