//! Classification output.

use crate::agent::Agent;
use crate::evidence::CONFIDENCE_CEILING;
use crate::priority::Priority;
use crate::rules::CategoryRule;
use serde::{Deserialize, Serialize};

/// Final classification handed back to the caller.
///
/// Built fresh for every call; the engine keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub issue_type: String,
    pub urgency_label: String,
    pub category: String,
    pub subcategory: String,
    pub priority: Priority,
    /// In `0.0..=0.95`
    pub confidence: f64,
    pub department: String,
    pub estimated_resolution_time: String,
    /// Insertion order, duplicates kept
    pub tags: Vec<String>,
    pub agent: Agent,
    pub coordination_note: String,
    /// Always true; reserved for ledger integration
    pub blockchain_ready: bool,
    /// Always true; reserved for attestation
    pub attestation_eligible: bool,
}

impl ClassificationResult {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Working record threaded through the pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResultDraft {
    pub issue_type: String,
    pub urgency_label: String,
    pub category: String,
    pub subcategory: String,
    pub priority: Priority,
    pub confidence: f64,
    pub department: String,
    pub estimated_resolution_time: String,
    pub tags: Vec<String>,
    pub location_fragment: Option<String>,
}

impl ResultDraft {
    /// Every field is taken from the rule, tags included; nothing carries
    /// over from any other rule. Base confidence is capped at the ceiling.
    pub fn from_rule(rule: &CategoryRule) -> Self {
        Self {
            issue_type: rule.issue_type.clone(),
            urgency_label: rule.urgency_label.clone(),
            category: rule.category.clone(),
            subcategory: rule.subcategory.clone(),
            priority: rule.priority,
            confidence: rule.base_confidence.min(CONFIDENCE_CEILING),
            department: rule.department.clone(),
            estimated_resolution_time: rule.estimated_resolution_time.clone(),
            tags: rule.tags.clone(),
            location_fragment: None,
        }
    }

    pub fn push_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    pub fn finish(self, agent: Agent, coordination_note: String) -> ClassificationResult {
        ClassificationResult {
            issue_type: self.issue_type,
            urgency_label: self.urgency_label,
            category: self.category,
            subcategory: self.subcategory,
            priority: self.priority,
            confidence: self.confidence,
            department: self.department,
            estimated_resolution_time: self.estimated_resolution_time,
            tags: self.tags,
            agent,
            coordination_note,
            blockchain_ready: true,
            attestation_eligible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleTable;

    #[test]
    fn test_draft_copies_rule_tags_only() {
        let table = RuleTable::builtin();
        let noise = &table.categories()[4];
        let draft = ResultDraft::from_rule(noise);
        assert_eq!(draft.tags, noise.tags);
        assert_eq!(draft.confidence, noise.base_confidence);
        assert!(draft.location_fragment.is_none());
    }

    #[test]
    fn test_full_confidence_rule_starts_at_ceiling() {
        let mut rule = RuleTable::builtin().categories()[0].clone();
        rule.base_confidence = 1.0;
        let draft = ResultDraft::from_rule(&rule);
        assert_eq!(draft.confidence, CONFIDENCE_CEILING);
    }

    #[test]
    fn test_finish_sets_constant_flags() {
        let table = RuleTable::builtin();
        let result = ResultDraft::from_rule(table.default_rule())
            .finish(Agent::TriageAgent, "note".to_string());
        assert!(result.blockchain_ready);
        assert!(result.attestation_eligible);
        assert_ne!(result.priority, Priority::Urgent);
    }

    #[test]
    fn test_json_field_names() {
        let table = RuleTable::builtin();
        let result = ResultDraft::from_rule(table.default_rule())
            .finish(Agent::TriageAgent, "Initial categorization completed".to_string());
        let json = serde_json::to_value(&result).unwrap();

        for key in [
            "issueType",
            "urgencyLabel",
            "category",
            "subcategory",
            "priority",
            "confidence",
            "department",
            "estimatedResolutionTime",
            "tags",
            "agent",
            "coordinationNote",
            "blockchainReady",
            "attestationEligible",
        ] {
            assert!(json.get(key).is_some(), "missing field {key}");
        }
        assert_eq!(json["priority"], "low");
        assert_eq!(json["agent"], "TriageAgent");
    }
}
