//! Location enrichment.

use crate::result::ResultDraft;
use tracing::debug;

pub const LOCATION_TAG_PREFIX: &str = "location:";

/// Lowercase, trim, and collapse each whitespace run into one `_`.
/// Blank input yields `None`.
pub fn normalize_location(raw: &str) -> Option<String> {
    let normalized = raw
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

pub fn location_tag(raw: &str) -> Option<String> {
    normalize_location(raw).map(|loc| format!("{}{}", LOCATION_TAG_PREFIX, loc))
}

/// Coordination note fragment naming the routing department
pub fn routing_fragment(department: &str) -> String {
    format!(". Location-based routing to {}", department)
}

/// Append the location tag and remember the note fragment.
/// Returns the tag that was added.
pub(crate) fn apply(draft: &mut ResultDraft, location: Option<&str>) -> Option<String> {
    let tag = location_tag(location?)?;

    debug!("Location enricher: tag={} department={}", tag, draft.department);
    draft.push_tag(tag.clone());
    draft.location_fragment = Some(routing_fragment(&draft.department));

    Some(tag)
}
