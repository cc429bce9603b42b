//! Triage pipeline.
//!
//! Matcher -> resolver -> escalation -> evidence/trust -> location -> dispatch.
//! Every stage is a pure computation over the input and the rule table, so
//! one engine can be shared by any number of threads without locking.

use crate::dispatch;
use crate::escalation;
use crate::evidence;
use crate::input::ClassificationInput;
use crate::location;
use crate::matcher::NormalizedText;
use crate::resolver;
use crate::result::{ClassificationResult, ResultDraft};
use crate::rules::RuleTable;
use crate::trace::TriageTrace;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result plus the decisions that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub result: ClassificationResult,
    pub trace: TriageTrace,
}

#[derive(Debug, Clone)]
pub struct TriageEngine {
    rules: Arc<RuleTable>,
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new(RuleTable::builtin())
    }
}

impl TriageEngine {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Classify one complaint. Never fails.
    pub fn classify(&self, input: &ClassificationInput) -> ClassificationResult {
        self.explain(input).result
    }

    /// Classify and keep the trace of which rules fired
    pub fn explain(&self, input: &ClassificationInput) -> Explanation {
        let text = NormalizedText::new(&input.description);

        let resolution = resolver::resolve(&self.rules, &text);
        let mut draft = ResultDraft::from_rule(resolution.rule);

        let escalation_keyword = escalation::apply(&mut draft, &text);
        let confidence_steps = evidence::apply(&mut draft, input);
        let location_tag = location::apply(&mut draft, input.location.as_deref());

        let result = dispatch::dispatch(draft, input.is_trusted());

        let trace = TriageTrace {
            matched_rule: resolution.rule.name.clone(),
            rule_index: resolution.index,
            matched_keyword: resolution.keyword.map(str::to_string),
            escalation_keyword: escalation_keyword.map(str::to_string),
            confidence_steps,
            location_tag,
        };

        Explanation { result, trace }
    }

    /// Classify several complaints, preserving input order
    pub fn classify_batch(&self, inputs: &[ClassificationInput]) -> Vec<ClassificationResult> {
        inputs.iter().map(|input| self.classify(input)).collect()
    }
}

/// Classify against the built-in rule table
pub fn classify(input: &ClassificationInput) -> ClassificationResult {
    TriageEngine::default().classify(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;
    use crate::priority::Priority;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_general_complaint() {
        let result = classify(&ClassificationInput::new("the clerk was rude to me"));
        assert_eq!(result.issue_type, "General Complaint");
        assert_eq!(result.category, "general");
        assert_eq!(result.priority, Priority::Low);
        assert_abs_diff_eq!(result.confidence, 0.7, epsilon = 1e-12);
        assert!(result.tags.is_empty());
        assert_eq!(result.agent, Agent::TriageAgent);
        assert_eq!(result.coordination_note, "Initial categorization completed");
    }

    #[test]
    fn test_pothole() {
        let result = classify(&ClassificationInput::new("Deep POTHOLE on 5th avenue"));
        assert_eq!(result.category, "infrastructure");
        assert_eq!(result.subcategory, "road_maintenance");
        assert_eq!(result.priority, Priority::High);
        assert_abs_diff_eq!(result.confidence, 0.9, epsilon = 1e-12);
        assert_eq!(result.department, "Roads & Transportation");
        assert_eq!(result.agent, Agent::PriorityTriageAgent);
        assert_eq!(result.coordination_note, "Flagged for priority handling");
    }

    #[test]
    fn test_end_to_end() {
        let input = ClassificationInput::new("urgent water leak near school")
            .with_image("a.jpg")
            .with_location("Ward 5")
            .trusted();
        let result = classify(&input);

        assert_eq!(result.category, "utilities");
        assert_eq!(result.subcategory, "water_supply");
        assert_eq!(result.priority, Priority::Urgent);
        assert_eq!(result.urgency_label, "Critical");
        assert_eq!(result.estimated_resolution_time, "0-24 hours");
        assert_abs_diff_eq!(result.confidence, 0.95, epsilon = 1e-12);
        assert_eq!(
            result.tags,
            vec![
                "water",
                "utilities",
                "infrastructure",
                "emergency",
                "image_verified",
                "location:ward_5"
            ]
        );
        assert_eq!(result.agent, Agent::EmergencyTriageAgent);
        assert_eq!(
            result.coordination_note,
            "Escalated to emergency protocols. Location-based routing to Water Department. Reporter has verified history"
        );
        assert!(result.blockchain_ready);
        assert!(result.attestation_eligible);
    }

    #[test]
    fn test_explain_matches_classify() {
        let engine = TriageEngine::default();
        let input = ClassificationInput::new("Dangerous dark alley, lamp broken")
            .with_location("Old Town");
        let explanation = engine.explain(&input);

        assert_eq!(explanation.result, engine.classify(&input));
        assert_eq!(explanation.trace.matched_rule, "street_lighting");
        assert_eq!(explanation.trace.rule_index, Some(3));
        assert_eq!(explanation.trace.matched_keyword.as_deref(), Some("lamp"));
        assert_eq!(explanation.trace.escalation_keyword.as_deref(), Some("dangerous"));
        assert!(explanation.trace.confidence_steps.is_empty());
        assert_eq!(
            explanation.trace.location_tag.as_deref(),
            Some("location:old_town")
        );
    }

    #[test]
    fn test_batch_preserves_order() {
        let engine = TriageEngine::default();
        let inputs = vec![
            ClassificationInput::new("litter everywhere"),
            ClassificationInput::new("loud bass"),
            ClassificationInput::new("nothing specific"),
        ];
        let categories: Vec<String> = engine
            .classify_batch(&inputs)
            .into_iter()
            .map(|r| r.category)
            .collect();
        assert_eq!(categories, vec!["sanitation", "public_order", "general"]);
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TriageEngine>();
        assert_send_sync::<ClassificationResult>();
    }
}
