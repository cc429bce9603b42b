//! Category resolution: first rule with any keyword hit wins.

use crate::matcher::NormalizedText;
use crate::rules::{CategoryRule, RuleTable};
use tracing::debug;

/// Outcome of category resolution
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'r> {
    pub rule: &'r CategoryRule,
    /// Position in the category list, `None` for the default rule
    pub index: Option<usize>,
    pub keyword: Option<&'r str>,
}

/// Resolve the base category. Total: falls back to the default rule.
pub fn resolve<'r>(table: &'r RuleTable, text: &NormalizedText) -> Resolution<'r> {
    for (index, rule) in table.categories().iter().enumerate() {
        if let Some(keyword) = text.first_hit(&rule.keywords) {
            debug!(
                "Category resolver: rule={} index={} keyword={:?}",
                rule.name, index, keyword
            );
            return Resolution {
                rule,
                index: Some(index),
                keyword: Some(keyword),
            };
        }
    }

    let rule = table.default_rule();
    debug!("Category resolver: no keyword hit, using {}", rule.name);
    Resolution {
        rule,
        index: None,
        keyword: None,
    }
}
