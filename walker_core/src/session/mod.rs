//! Traversal sessions - the state machine that walks a flowchart.
//!
//! A session is an explicit value: every operation takes the graph by
//! reference and mutates only the session, so each transition is
//! deterministic and unit-testable without any rendering environment.
//!
//! The walk has two live states per session - awaiting a selection on a
//! question node, or resting on an endpoint - plus the implicit "no node
//! found" state entered when the current position stops resolving (a null
//! transition or a dangling reference). The latter is presented as
//! "investigation complete", never as an error.

mod path;

pub use path::*;

use chrono::Utc;
use flow_model::{FlowNode, Flowchart, NodeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by traversal operations. Each is rejected synchronously
/// with no partial mutation of the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    /// The current position does not resolve to a node.
    #[error("no node found for the current position")]
    NoCurrentNode,

    /// A confirmation needs at least one selected option.
    #[error("at least one option must be selected")]
    EmptySelection,

    /// A selected key does not exist on the current node.
    #[error("the current node has no option `{0}`")]
    UnknownOption(String),
}

/// Where a session currently stands, derived from the graph on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// The current node is a question awaiting a choice.
    AwaitingSelection,

    /// The current node is an endpoint; its message is the outcome.
    EndpointReached,

    /// The current position resolves to no node ("investigation complete").
    NoNodeFound,
}

/// One user's walk through a flowchart: current position, the pending
/// multi-selection set, the path taken, and the outcome messages gathered
/// by the latest confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    current_node_id: Option<NodeId>,
    pending_selection: Vec<String>,
    path: Vec<PathEntry>,
    outcomes: Vec<String>,
}

impl Session {
    /// Begin a walk at the graph's start node.
    pub fn start(chart: &Flowchart) -> Self {
        Self {
            current_node_id: Some(chart.start_node_id().clone()),
            ..Self::default()
        }
    }

    /// The identifier of the current position, if any.
    pub fn current_node_id(&self) -> Option<&NodeId> {
        self.current_node_id.as_ref()
    }

    /// Resolve the current position against the graph.
    pub fn current_node<'a>(&self, chart: &'a Flowchart) -> Option<&'a FlowNode> {
        self.current_node_id
            .as_ref()
            .and_then(|id| chart.node(id))
    }

    /// The option keys toggled on but not yet confirmed, in toggle order.
    pub fn pending_selection(&self) -> &[String] {
        &self.pending_selection
    }

    /// The recorded path, one entry per confirmed choice.
    pub fn path(&self) -> &[PathEntry] {
        &self.path
    }

    /// The endpoint messages gathered by the latest confirmation.
    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    /// Derive the session's state from the graph.
    pub fn state(&self, chart: &Flowchart) -> SessionState {
        match self.current_node(chart) {
            Some(node) if node.is_endpoint => SessionState::EndpointReached,
            Some(_) => SessionState::AwaitingSelection,
            None => SessionState::NoNodeFound,
        }
    }

    /// The outcome messages to present: the aggregated list from the last
    /// confirmation, or the current endpoint's own message when only one
    /// path was followed.
    pub fn outcome_messages(&self, chart: &Flowchart) -> Vec<String> {
        if !self.outcomes.is_empty() {
            return self.outcomes.clone();
        }
        self.current_node(chart)
            .filter(|node| node.is_endpoint)
            .and_then(|node| node.endpoint_message.clone())
            .map(|message| vec![message])
            .unwrap_or_default()
    }

    /// Choose an option on a single-selection node. Final: equivalent to
    /// confirming a one-element selection.
    pub fn choose(&mut self, chart: &Flowchart, key: &str) -> Result<(), WalkError> {
        self.confirm_selection(chart, &[key])
    }

    /// Toggle membership of an option in the pending selection set
    /// (multiple-selection nodes). Returns whether the option is selected
    /// after the toggle. No transition occurs.
    pub fn toggle_option(&mut self, chart: &Flowchart, key: &str) -> Result<bool, WalkError> {
        let node = self.current_node(chart).ok_or(WalkError::NoCurrentNode)?;
        if node.option(key).is_none() {
            return Err(WalkError::UnknownOption(key.to_string()));
        }
        if let Some(position) = self.pending_selection.iter().position(|k| k == key) {
            self.pending_selection.remove(position);
            Ok(false)
        } else {
            self.pending_selection.push(key.to_string());
            Ok(true)
        }
    }

    /// Confirm the pending selection set. Rejected when nothing is toggled
    /// on; the pending set survives a rejection untouched.
    pub fn confirm_pending(&mut self, chart: &Flowchart) -> Result<(), WalkError> {
        let pending = self.pending_selection.clone();
        self.confirm_selection(chart, &pending)
    }

    /// Confirm an ordered selection of option keys and advance.
    ///
    /// Appends exactly one [`PathEntry`], clears the pending set, gathers
    /// the endpoint messages of every node the selection reaches
    /// (overwriting the previous outcome list), and advances the current
    /// position to the first reached node only - later branches contribute
    /// their message, never further traversal. A selection whose options
    /// all lack targets completes the walk.
    pub fn confirm_selection<S: AsRef<str>>(
        &mut self,
        chart: &Flowchart,
        keys: &[S],
    ) -> Result<(), WalkError> {
        if keys.is_empty() {
            return Err(WalkError::EmptySelection);
        }
        let node = self.current_node(chart).ok_or(WalkError::NoCurrentNode)?;

        // De-duplicate preserving first occurrence, the same set a
        // toggle-built selection would hold.
        let mut selected: Vec<String> = Vec::with_capacity(keys.len());
        for key in keys {
            let key = key.as_ref();
            if !selected.iter().any(|k| k == key) {
                selected.push(key.to_string());
            }
        }

        // Resolve every key before mutating anything.
        let mut texts = Vec::with_capacity(selected.len());
        for key in &selected {
            let option = node
                .option(key)
                .ok_or_else(|| WalkError::UnknownOption(key.clone()))?;
            texts.push(option.text.clone());
        }

        // Targets in selection order; duplicates kept when several options
        // point at the same node.
        let next_ids: Vec<NodeId> = selected
            .iter()
            .filter_map(|key| node.option(key).and_then(|o| o.next_node_id.clone()))
            .collect();

        self.path.push(PathEntry {
            node_id: node.id.clone(),
            question: node.question.clone(),
            selected_options: selected,
            selected_text: texts.first().cloned().unwrap_or_default(),
            selected_texts: texts,
            selection_mode: node.selection_mode,
            timestamp: Utc::now(),
        });
        self.pending_selection.clear();

        // Every confirmation overwrites the outcome list; only endpoints
        // this selection actually reached contribute messages.
        self.outcomes = next_ids
            .iter()
            .filter_map(|id| chart.node(id))
            .filter(|n| n.is_endpoint)
            .filter_map(|n| n.endpoint_message.clone())
            .collect();
        self.current_node_id = next_ids.first().cloned();
        Ok(())
    }

    /// Abandon the walk unconditionally: clears position, pending set,
    /// path, and outcomes, returning to the pre-traversal state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reset and re-enter the graph at its start node.
    pub fn restart(&mut self, chart: &Flowchart) {
        *self = Self::start(chart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_model::{NodeOption, SelectionMode};

    fn endpoint(n: usize, message: &str) -> FlowNode {
        FlowNode::new(NodeId::numbered(n)).endpoint(message)
    }

    /// A multi-select fan-out: node_1 offers four options, each pointing at
    /// a distinct endpoint (node_2..node_5).
    fn fan_out_chart() -> Flowchart {
        let start = FlowNode::new(NodeId::numbered(1))
            .with_question("Which checks apply?")
            .with_mode(SelectionMode::Multiple)
            .with_option("option1", NodeOption::leading_to("First", NodeId::numbered(2)))
            .with_option("option2", NodeOption::leading_to("Second", NodeId::numbered(3)))
            .with_option("option3", NodeOption::leading_to("Third", NodeId::numbered(4)))
            .with_option("option4", NodeOption::leading_to("Fourth", NodeId::numbered(5)));
        let mut chart = Flowchart::new(start);
        chart.insert_node(endpoint(2, "Message A"));
        chart.insert_node(endpoint(3, "Message B"));
        chart.insert_node(endpoint(4, "Message C"));
        chart.insert_node(endpoint(5, "Message D"));
        chart
    }

    #[test]
    fn test_single_selection_is_deterministic() {
        let chart = Flowchart::default_investigation();
        let mut session = Session::start(&chart);

        session.choose(&chart, "option2").unwrap();

        assert_eq!(session.current_node_id(), Some(&NodeId::numbered(3)));
        assert_eq!(session.path().len(), 1);
        let entry = &session.path()[0];
        assert_eq!(entry.selected_options, vec!["option2"]);
        assert_eq!(entry.selected_texts, vec!["No"]);
        assert_eq!(entry.selected_text, "No");
        assert_eq!(entry.selection_mode, SelectionMode::Single);
    }

    #[test]
    fn test_emsn_scenario() {
        let chart = Flowchart::default_investigation();
        let mut session = Session::start(&chart);

        // node_1 "Business Events?" -> No -> node_3 (the EMSN question).
        session.choose(&chart, "option2").unwrap();
        let node = session.current_node(&chart).unwrap();
        assert!(node.question.starts_with("Do you have an EMSN"));

        session.choose(&chart, "option2").unwrap();

        let entry = session.path().last().unwrap();
        assert_eq!(entry.selected_options, vec!["option2"]);
        assert_eq!(entry.selected_texts, vec!["No"]);
        assert_eq!(session.current_node_id(), Some(&NodeId::numbered(7)));
        assert_eq!(session.state(&chart), SessionState::AwaitingSelection);
    }

    #[test]
    fn test_empty_confirmation_is_rejected_without_mutation() {
        let chart = fan_out_chart();
        let mut session = Session::start(&chart);
        let before = session.clone();

        let err = session.confirm_pending(&chart).unwrap_err();
        assert_eq!(err, WalkError::EmptySelection);
        assert_eq!(session, before);

        let err = session.confirm_selection::<&str>(&chart, &[]).unwrap_err();
        assert_eq!(err, WalkError::EmptySelection);
        assert_eq!(session, before);
    }

    #[test]
    fn test_unknown_option_is_rejected_without_mutation() {
        let chart = fan_out_chart();
        let mut session = Session::start(&chart);
        let before = session.clone();

        let err = session
            .confirm_selection(&chart, &["option1", "option9"])
            .unwrap_err();
        assert_eq!(err, WalkError::UnknownOption("option9".to_string()));
        assert_eq!(session, before);
    }

    #[test]
    fn test_toggle_builds_and_shrinks_the_pending_set() {
        let chart = fan_out_chart();
        let mut session = Session::start(&chart);

        assert!(session.toggle_option(&chart, "option3").unwrap());
        assert!(session.toggle_option(&chart, "option1").unwrap());
        assert_eq!(session.pending_selection(), ["option3", "option1"]);

        assert!(!session.toggle_option(&chart, "option3").unwrap());
        assert_eq!(session.pending_selection(), ["option1"]);

        let err = session.toggle_option(&chart, "option9").unwrap_err();
        assert_eq!(err, WalkError::UnknownOption("option9".to_string()));
    }

    #[test]
    fn test_multi_selection_aggregates_outcomes_in_selection_order() {
        let chart = fan_out_chart();
        let mut session = Session::start(&chart);

        session.toggle_option(&chart, "option1").unwrap();
        session.toggle_option(&chart, "option3").unwrap();
        session.confirm_pending(&chart).unwrap();

        // Both reached endpoints contribute, selection order preserved;
        // the position advances to the first target only.
        assert_eq!(session.outcomes(), ["Message A", "Message C"]);
        assert_eq!(session.current_node_id(), Some(&NodeId::numbered(2)));
        assert_eq!(session.state(&chart), SessionState::EndpointReached);
        assert!(session.pending_selection().is_empty());

        let entry = &session.path()[0];
        assert_eq!(entry.selected_options, vec!["option1", "option3"]);
        assert_eq!(entry.selected_texts, vec!["First", "Third"]);
        assert_eq!(entry.selection_mode, SelectionMode::Multiple);
    }

    #[test]
    fn test_confirmation_overwrites_previous_outcomes() {
        let chart = fan_out_chart();
        let mut session = Session::start(&chart);

        session.toggle_option(&chart, "option1").unwrap();
        session.toggle_option(&chart, "option2").unwrap();
        session.confirm_pending(&chart).unwrap();
        assert_eq!(session.outcomes(), ["Message A", "Message B"]);

        // Endpoints keep blank no-transition options in the wire shape;
        // confirming one completes the walk and drops the stale list.
        let chart = {
            let mut chart = fan_out_chart();
            let endpoint_with_options = FlowNode::new(NodeId::numbered(2))
                .with_option("option1", NodeOption::new(""))
                .with_option("option2", NodeOption::new(""))
                .endpoint("Message A");
            chart.insert_node(endpoint_with_options);
            chart
        };
        session.confirm_selection(&chart, &["option1"]).unwrap();

        assert!(session.outcomes().is_empty());
        assert_eq!(session.current_node_id(), None);
        assert_eq!(session.state(&chart), SessionState::NoNodeFound);
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let chart = fan_out_chart();
        let mut session = Session::start(&chart);

        session
            .confirm_selection(&chart, &["option2", "option2", "option1"])
            .unwrap();

        let entry = &session.path()[0];
        assert_eq!(entry.selected_options, vec!["option2", "option1"]);
        assert_eq!(session.outcomes(), ["Message B", "Message A"]);
        assert_eq!(session.current_node_id(), Some(&NodeId::numbered(3)));
    }

    #[test]
    fn test_dangling_reference_walks_to_no_node_found() {
        let mut chart = fan_out_chart();
        chart.delete_node(&NodeId::numbered(2)).unwrap();

        let mut session = Session::start(&chart);
        session.choose(&chart, "option1").unwrap();

        // The position points at the deleted node: same presentation as a
        // deliberately empty transition.
        assert_eq!(session.current_node_id(), Some(&NodeId::numbered(2)));
        assert_eq!(session.state(&chart), SessionState::NoNodeFound);
        assert!(session.outcomes().is_empty());
    }

    #[test]
    fn test_outcome_messages_fall_back_to_current_endpoint() {
        let chart = fan_out_chart();
        let mut session = Session::start(&chart);
        session.choose(&chart, "option4").unwrap();

        // Single path followed: the aggregated list and the fallback agree.
        assert_eq!(session.outcome_messages(&chart), ["Message D"]);

        let mut bare = Session::start(&chart);
        bare.current_node_id = Some(NodeId::numbered(5));
        assert_eq!(bare.outcome_messages(&chart), ["Message D"]);
    }

    #[test]
    fn test_reset_and_restart() {
        let chart = fan_out_chart();
        let mut session = Session::start(&chart);
        session.choose(&chart, "option1").unwrap();

        session.reset();
        assert_eq!(session, Session::default());
        assert_eq!(session.state(&chart), SessionState::NoNodeFound);

        session.restart(&chart);
        assert_eq!(session.current_node_id(), Some(chart.start_node_id()));
        assert!(session.path().is_empty());
        assert_eq!(session.state(&chart), SessionState::AwaitingSelection);
    }

    #[test]
    fn test_path_entry_timestamps_are_monotonic_enough() {
        let chart = Flowchart::default_investigation();
        let mut session = Session::start(&chart);

        session.choose(&chart, "option2").unwrap();
        session.choose(&chart, "option1").unwrap();

        let path = session.path();
        assert_eq!(path.len(), 2);
        assert!(path[0].timestamp <= path[1].timestamp);
    }
}
