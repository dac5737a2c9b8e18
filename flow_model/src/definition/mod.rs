//! Flowchart definitions - loading complete graphs from TOML or JSON, and
//! the built-in default used when an owner has no saved graph yet.

use thiserror::Error;

use crate::graph::{Flowchart, GraphError};
use crate::node::{FlowNode, NodeId, NodeOption, SelectionMode};

/// Errors reported while loading a flowchart definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The TOML text could not be parsed into a flowchart.
    #[error("failed to parse TOML flowchart definition: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON text could not be parsed into a flowchart.
    #[error("failed to parse JSON flowchart definition: {0}")]
    Json(#[from] serde_json::Error),

    /// The parsed graph violates a structural invariant.
    #[error("invalid flowchart definition: {0}")]
    Invalid(#[from] GraphError),
}

impl Flowchart {
    /// Parse a flowchart from a TOML definition and validate it.
    pub fn from_toml_str(input: &str) -> Result<Self, DefinitionError> {
        let chart: Flowchart = toml::from_str(input)?;
        chart.validate()?;
        Ok(chart)
    }

    /// Parse a flowchart from a JSON definition (the persisted wire shape)
    /// and validate it.
    pub fn from_json_str(input: &str) -> Result<Self, DefinitionError> {
        let chart: Flowchart = serde_json::from_str(input)?;
        chart.validate()?;
        Ok(chart)
    }

    /// The built-in trade investigation flowchart.
    ///
    /// This is the graph first-time users start from; authored graphs
    /// replace it once saved.
    pub fn default_investigation() -> Self {
        let mut chart = Flowchart::new(
            question(1, "Do you have Business Events to process?")
                .with_option("option1", NodeOption::leading_to("Yes", NodeId::numbered(2)))
                .with_option("option2", NodeOption::leading_to("No", NodeId::numbered(3))),
        );

        chart.insert_node(
            question(2, "What checks do you need to perform? (Select all that apply)")
                .with_mode(SelectionMode::Multiple)
                .with_option(
                    "option1",
                    NodeOption::leading_to("Check BCT/RiskPortfolio Limits", NodeId::numbered(8)),
                )
                .with_option(
                    "option2",
                    NodeOption::leading_to("Check ADS Rules", NodeId::numbered(9)),
                )
                .with_option(
                    "option3",
                    NodeOption::leading_to("Verify Settlement Instructions", NodeId::numbered(10)),
                )
                .with_option(
                    "option4",
                    NodeOption::leading_to("Review Counterparty Limits", NodeId::numbered(11)),
                ),
        );

        chart.insert_node(
            question(3, "Do you have an EMSN (Electronic Message Sequence Number)?")
                .with_option("option1", NodeOption::leading_to("Yes", NodeId::numbered(6)))
                .with_option("option2", NodeOption::leading_to("No", NodeId::numbered(7))),
        );

        chart.insert_node(endpoint(
            4,
            "Multiple investigation paths completed. Review all selected areas for \
             comprehensive trade analysis.",
        ));

        chart.insert_node(
            question(5, "Which system check do you need to perform?")
                .with_option(
                    "option1",
                    NodeOption::leading_to("Check BCT/RiskPortfolio Limits", NodeId::numbered(8)),
                )
                .with_option(
                    "option2",
                    NodeOption::leading_to("Check ADS Rules", NodeId::numbered(9)),
                ),
        );

        chart.insert_node(endpoint(
            6,
            "Find the EMSN and proceed with trade investigation. Use the EMSN to track \
             the specific transaction through the system.",
        ));

        chart.insert_node(
            question(7, "What type of trade details do you need?")
                .with_option(
                    "option1",
                    NodeOption::leading_to("Ask for Trade Details", NodeId::numbered(10)),
                )
                .with_option(
                    "option2",
                    NodeOption::leading_to("Escalate to TCAS", NodeId::numbered(11)),
                ),
        );

        chart.insert_node(
            question(8, "What is the BCT/RiskPortfolio limit status?")
                .with_option(
                    "option1",
                    NodeOption::leading_to("Limits are breached", NodeId::numbered(12)),
                )
                .with_option(
                    "option2",
                    NodeOption::leading_to("Limits are within range", NodeId::numbered(13)),
                ),
        );

        chart.insert_node(
            question(9, "What ADS rule issues do you observe? (Select all that apply)")
                .with_mode(SelectionMode::Multiple)
                .with_option(
                    "option1",
                    NodeOption::leading_to("Pricing/Currency Blacklisted", NodeId::numbered(14)),
                )
                .with_option(
                    "option2",
                    NodeOption::leading_to("MTF Enablement Issue", NodeId::numbered(15)),
                )
                .with_option(
                    "option3",
                    NodeOption::leading_to("Settlement Date Conflict", NodeId::numbered(16)),
                ),
        );

        chart.insert_node(
            question(10, "Do you have sufficient trade information?")
                .with_option(
                    "option1",
                    NodeOption::leading_to("Yes, proceed with investigation", NodeId::numbered(16)),
                )
                .with_option(
                    "option2",
                    NodeOption::leading_to("No, need more details", NodeId::numbered(17)),
                ),
        );

        chart.insert_node(endpoint(
            11,
            "Escalate to TCAS (Trade Capture and Settlement) team. Provide all available \
             trade details and context for further investigation.",
        ));

        chart.insert_node(endpoint(
            12,
            "BCT/RiskPortfolio limits have been breached. Contact Risk Management team to \
             review limit settings and authorize trade if appropriate.",
        ));

        chart.insert_node(
            question(13, "Are there any other risk factors to consider?")
                .with_option(
                    "option1",
                    NodeOption::leading_to("Yes, additional checks needed", NodeId::numbered(18)),
                )
                .with_option(
                    "option2",
                    NodeOption::leading_to("No, proceed with trade", NodeId::numbered(19)),
                ),
        );

        chart.insert_node(endpoint(
            14,
            "Pricing/Currency is blacklisted in ADS rules. Review the blacklist settings \
             and contact Compliance team to verify if the restriction should be lifted.",
        ));

        chart.insert_node(endpoint(
            15,
            "MTF (Multilateral Trading Facility) enablement issue detected. Check MTF \
             configuration settings and contact Technology team for system updates.",
        ));

        chart.insert_node(
            question(16, "What type of investigation is required?")
                .with_option(
                    "option1",
                    NodeOption::leading_to("Standard trade validation", NodeId::numbered(20)),
                )
                .with_option(
                    "option2",
                    NodeOption::leading_to("Complex scenario analysis", NodeId::numbered(21)),
                ),
        );

        chart.insert_node(endpoint(
            17,
            "Insufficient trade details provided. Request additional information including: \
             Trade ID, Counterparty, Settlement Date, and Currency details before proceeding.",
        ));

        chart.insert_node(endpoint(
            18,
            "Additional risk checks required. Perform enhanced due diligence including \
             credit risk assessment, market risk analysis, and regulatory compliance \
             verification.",
        ));

        chart.insert_node(endpoint(
            19,
            "All risk checks passed successfully. Trade can proceed through normal \
             settlement process. Monitor for any post-trade issues.",
        ));

        chart.insert_node(endpoint(
            20,
            "Perform standard trade validation: Verify trade details, check counterparty \
             limits, validate pricing, and confirm settlement instructions are correct.",
        ));

        chart.insert_node(endpoint(
            21,
            "Complex scenario analysis required. Go to Trade Investigation Part 2: \
             Scenario Analysis. Document all findings and escalate to senior trading desk \
             if needed.",
        ));

        chart
    }
}

fn question(n: usize, text: &str) -> FlowNode {
    FlowNode::new(NodeId::numbered(n)).with_question(text)
}

// Endpoints carry two blank options in the persisted shape; the walker never
// offers them because the endpoint message takes over.
fn endpoint(n: usize, message: &str) -> FlowNode {
    FlowNode::new(NodeId::numbered(n))
        .with_option("option1", NodeOption::new(""))
        .with_option("option2", NodeOption::new(""))
        .endpoint(message)
}
