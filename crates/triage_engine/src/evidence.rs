//! Evidence and trust adjustment.
//!
//! Image evidence is applied first, then reporter trust. Each boost clamps
//! on its own against the then-current confidence:
//!
//! ```text
//! c1 = min(0.95, base + 0.1)   // images present
//! c2 = min(0.95, c1 + 0.1)     // trusted reporter
//! ```
//!
//! This is not a flat `+0.2`: a single boost already at the ceiling leaves
//! the second one with nothing to add.

use crate::input::ClassificationInput;
use crate::result::ResultDraft;
use crate::trace::{Adjustment, ConfidenceStep};
use tracing::debug;

pub const CONFIDENCE_CEILING: f64 = 0.95;
pub const EVIDENCE_BOOST: f64 = 0.1;
pub const IMAGE_VERIFIED_TAG: &str = "image_verified";

/// One clamped boost
pub fn boost(confidence: f64) -> f64 {
    (confidence + EVIDENCE_BOOST).min(CONFIDENCE_CEILING)
}

fn step(draft: &mut ResultDraft, adjustment: Adjustment) -> ConfidenceStep {
    let before = draft.confidence;
    let after = boost(before);
    draft.confidence = after;
    debug!(
        "Evidence adjuster: {} {:.3} -> {:.3}",
        adjustment, before, after
    );
    ConfidenceStep {
        adjustment,
        before,
        after,
        clamped: after < before + EVIDENCE_BOOST,
    }
}

pub(crate) fn apply(draft: &mut ResultDraft, input: &ClassificationInput) -> Vec<ConfidenceStep> {
    let mut steps = Vec::new();

    if input.has_image_evidence() {
        steps.push(step(draft, Adjustment::ImageEvidence));
        draft.push_tag(IMAGE_VERIFIED_TAG);
    }

    if input.is_trusted() {
        steps.push(step(draft, Adjustment::TrustedReporter));
    }

    steps
}
