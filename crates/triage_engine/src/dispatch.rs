//! Agent dispatch and coordination note assembly.
//!
//! Note layout is fixed: agent seed, then the location fragment, then the
//! trusted-reporter fragment. Input field order has no influence.

use crate::agent::Agent;
use crate::result::{ClassificationResult, ResultDraft};
use tracing::debug;

pub const TRUSTED_REPORTER_FRAGMENT: &str = ". Reporter has verified history";

pub fn coordination_note(agent: Agent, location_fragment: Option<&str>, trusted: bool) -> String {
    let mut note = String::from(agent.note_seed());
    if let Some(fragment) = location_fragment {
        note.push_str(fragment);
    }
    if trusted {
        note.push_str(TRUSTED_REPORTER_FRAGMENT);
    }
    note
}

/// Pick the agent from the final priority and seal the result
pub(crate) fn dispatch(draft: ResultDraft, trusted: bool) -> ClassificationResult {
    let agent = Agent::for_priority(draft.priority);
    let note = coordination_note(agent, draft.location_fragment.as_deref(), trusted);
    debug!("Agent dispatcher: priority={} agent={}", draft.priority, agent);
    draft.finish(agent, note)
}
