//! Path/outcome reporting - presentation-only formatting of a walk.
//!
//! Nothing here alters stored text: truncation, summaries, and transcripts
//! are all derived views over the session's path history and outcome list.

use chrono::{DateTime, Utc};
use flow_model::Flowchart;
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Configuration for transcript and summary rendering.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Maximum characters shown before text is elided.
    pub truncate_at: usize,

    /// Heading line of rendered transcripts.
    pub heading: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            truncate_at: 50,
            heading: "Investigation Transcript".to_string(),
        }
    }
}

/// Shorten text for compact display, replacing the remainder with an
/// ellipsis marker. Strings within the limit pass through unmodified.
pub fn truncate_for_display(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// One rendered step: the question asked and the answers given, in
/// selection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptStep {
    pub question: String,
    pub answers: Vec<String>,
}

/// A render-ready snapshot of a session: the ordered steps plus the final
/// outcome messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    steps: Vec<TranscriptStep>,
    outcomes: Vec<String>,
}

impl Transcript {
    /// Capture the session's path and outcomes as they stand.
    pub fn from_session(session: &Session, chart: &Flowchart) -> Self {
        let steps = session
            .path()
            .iter()
            .map(|entry| TranscriptStep {
                question: entry.question.clone(),
                answers: entry.selected_texts.clone(),
            })
            .collect();
        Self {
            steps,
            outcomes: session.outcome_messages(chart),
        }
    }

    /// The captured steps.
    pub fn steps(&self) -> &[TranscriptStep] {
        &self.steps
    }

    /// The captured outcome messages.
    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    /// Render the transcript as plain text with a generation timestamp.
    pub fn render(&self, config: &ReportConfig, generated_at: DateTime<Utc>) -> String {
        let mut out = String::new();
        out.push_str(&config.heading);
        out.push('\n');
        out.push_str(&format!(
            "Generated: {}\n\n",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        for (index, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("Step {}: {}\n", index + 1, step.question));
            out.push_str(&format!("  Answered: {}\n", step.answers.join(", ")));
        }

        if !self.outcomes.is_empty() {
            out.push_str("\nOutcome:\n");
            for message in &self.outcomes {
                out.push_str(&format!("- {}\n", message));
            }
        }

        out
    }

    /// Per-step one-liners for progress display, truncated per config.
    pub fn step_summaries(&self, config: &ReportConfig) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| truncate_for_display(&step.answers.join(", "), config.truncate_at))
            .collect()
    }

    /// Timestamp-suffixed file name for the exported transcript.
    pub fn export_file_name(generated_at: DateTime<Utc>) -> String {
        format!(
            "investigation-path-{}.txt",
            generated_at.format("%Y%m%d-%H%M%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use flow_model::{FlowNode, NodeId, NodeOption, SelectionMode};

    fn walked_session() -> (Flowchart, Session) {
        let start = FlowNode::new(NodeId::numbered(1))
            .with_question("Which checks apply?")
            .with_mode(SelectionMode::Multiple)
            .with_option("option1", NodeOption::leading_to("Limits", NodeId::numbered(2)))
            .with_option("option2", NodeOption::leading_to("Rules", NodeId::numbered(3)));
        let mut chart = Flowchart::new(start);
        chart.insert_node(FlowNode::new(NodeId::numbered(2)).endpoint("Check the limits."));
        chart.insert_node(FlowNode::new(NodeId::numbered(3)).endpoint("Check the rules."));

        let mut session = Session::start(&chart);
        session
            .confirm_selection(&chart, &["option1", "option2"])
            .unwrap();
        (chart, session)
    }

    #[test]
    fn test_truncation_thresholds() {
        let long = "a".repeat(60);
        let truncated = truncate_for_display(&long, 50);
        assert_eq!(truncated.chars().count(), 50);
        assert_eq!(truncated, format!("{}...", "a".repeat(47)));

        let exact = "b".repeat(50);
        assert_eq!(truncate_for_display(&exact, 50), exact);

        let short = "within limits";
        assert_eq!(truncate_for_display(short, 50), short);
    }

    #[test]
    fn test_truncation_is_char_boundary_safe() {
        let text = "é".repeat(60);
        let truncated = truncate_for_display(&text, 50);
        assert_eq!(truncated, format!("{}...", "é".repeat(47)));
    }

    #[test]
    fn test_transcript_captures_steps_and_outcomes() {
        let (chart, session) = walked_session();
        let transcript = Transcript::from_session(&session, &chart);

        assert_eq!(transcript.steps().len(), 1);
        assert_eq!(transcript.steps()[0].question, "Which checks apply?");
        assert_eq!(transcript.steps()[0].answers, vec!["Limits", "Rules"]);
        assert_eq!(
            transcript.outcomes(),
            ["Check the limits.", "Check the rules."]
        );
    }

    #[test]
    fn test_render_contains_every_section() {
        let (chart, session) = walked_session();
        let transcript = Transcript::from_session(&session, &chart);
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap();

        let text = transcript.render(&ReportConfig::default(), generated_at);

        assert!(text.starts_with("Investigation Transcript\n"));
        assert!(text.contains("Generated: 2024-05-14 09:30:00 UTC"));
        assert!(text.contains("Step 1: Which checks apply?"));
        assert!(text.contains("  Answered: Limits, Rules"));
        assert!(text.contains("Outcome:\n- Check the limits.\n- Check the rules.\n"));
    }

    #[test]
    fn test_step_summaries_are_truncated() {
        let chart = Flowchart::new(
            FlowNode::new(NodeId::numbered(1))
                .with_question("Which checks apply?")
                .with_option("option1", NodeOption::new("x".repeat(80)))
                .with_option("option2", NodeOption::new("short")),
        );
        let mut session = Session::start(&chart);
        session.choose(&chart, "option1").unwrap();

        let transcript = Transcript::from_session(&session, &chart);
        let summaries = transcript.step_summaries(&ReportConfig::default());

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0], format!("{}...", "x".repeat(47)));
    }

    #[test]
    fn test_export_file_name_carries_timestamp_suffix() {
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 5).unwrap();
        assert_eq!(
            Transcript::export_file_name(generated_at),
            "investigation-path-20240514-093005.txt"
        );
    }
}
