//! Explanation of a single triage run.
//!
//! Observational only: the trace never feeds back into classification.

use serde::{Deserialize, Serialize};

/// Why confidence moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    ImageEvidence,
    TrustedReporter,
}

impl std::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageEvidence => write!(f, "image evidence"),
            Self::TrustedReporter => write!(f, "trusted reporter"),
        }
    }
}

/// One confidence boost, before and after its clamp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceStep {
    pub adjustment: Adjustment,
    pub before: f64,
    pub after: f64,
    /// True when the ceiling cut the boost short
    pub clamped: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageTrace {
    /// Name of the selected rule
    pub matched_rule: String,
    /// Position in the category list, `None` when the default applied
    pub rule_index: Option<usize>,
    pub matched_keyword: Option<String>,
    pub escalation_keyword: Option<String>,
    pub confidence_steps: Vec<ConfidenceStep>,
    pub location_tag: Option<String>,
}

impl TriageTrace {
    /// One line per decision, for terminal output
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        match (&self.rule_index, &self.matched_keyword) {
            (Some(idx), Some(kw)) => lines.push(format!(
                "rule #{} {} matched on '{}'",
                idx + 1,
                self.matched_rule,
                kw
            )),
            _ => lines.push(format!("no keyword hit, default rule {}", self.matched_rule)),
        }

        if let Some(kw) = &self.escalation_keyword {
            lines.push(format!("escalated on '{}'", kw));
        }

        for step in &self.confidence_steps {
            let clamp = if step.clamped { " (clamped)" } else { "" };
            lines.push(format!(
                "{}: confidence {:.2} -> {:.2}{}",
                step.adjustment, step.before, step.after, clamp
            ));
        }

        if let Some(tag) = &self.location_tag {
            lines.push(format!("location tag {}", tag));
        }

        lines
    }
}
