//! Handling agents that triaged complaints are routed to.

use crate::priority::Priority;
use serde::{Deserialize, Serialize};

/// Downstream handling track. A label only; nothing is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Agent {
    TriageAgent,
    EmergencyTriageAgent,
    PriorityTriageAgent,
}

impl Agent {
    /// Total mapping from final priority to agent.
    pub fn for_priority(priority: Priority) -> Self {
        match priority {
            Priority::Urgent => Self::EmergencyTriageAgent,
            Priority::High => Self::PriorityTriageAgent,
            Priority::Medium | Priority::Low => Self::TriageAgent,
        }
    }

    /// Opening fragment of the coordination note
    pub fn note_seed(&self) -> &'static str {
        match self {
            Self::EmergencyTriageAgent => "Escalated to emergency protocols",
            Self::PriorityTriageAgent => "Flagged for priority handling",
            Self::TriageAgent => "Initial categorization completed",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TriageAgent => "TriageAgent",
            Self::EmergencyTriageAgent => "EmergencyTriageAgent",
            Self::PriorityTriageAgent => "PriorityTriageAgent",
        }
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
