//! Escalation filter.
//!
//! Runs after category resolution and before evidence/trust adjustment,
//! independent of which rule matched. Department is never touched.

use crate::matcher::NormalizedText;
use crate::priority::Priority;
use crate::result::ResultDraft;
use tracing::debug;

pub const ESCALATION_KEYWORDS: [&str; 4] = ["emergency", "urgent", "immediate", "dangerous"];

pub const CRITICAL_URGENCY_LABEL: &str = "Critical";
pub const EMERGENCY_RESOLUTION_TIME: &str = "0-24 hours";
pub const EMERGENCY_TAG: &str = "emergency";

/// Escalation keyword present in the text, if any
pub fn detect(text: &NormalizedText) -> Option<&'static str> {
    ESCALATION_KEYWORDS
        .iter()
        .copied()
        .find(|kw| text.contains(kw))
}

/// Force urgent handling when emergency language is present
pub(crate) fn apply(draft: &mut ResultDraft, text: &NormalizedText) -> Option<&'static str> {
    let keyword = detect(text)?;

    debug!(
        "Escalation: keyword={} overriding priority {} -> urgent",
        keyword, draft.priority
    );
    draft.priority = Priority::Urgent;
    draft.urgency_label = CRITICAL_URGENCY_LABEL.to_string();
    draft.estimated_resolution_time = EMERGENCY_RESOLUTION_TIME.to_string();
    draft.push_tag(EMERGENCY_TAG);

    Some(keyword)
}
