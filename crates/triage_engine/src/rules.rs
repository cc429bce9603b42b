//! Category rule table.
//!
//! The table is an ordered list of keyword rules plus one default rule.
//! Evaluation is first-match-wins, so order is part of the contract:
//! several rules can match the same complaint ("water damage on the street"
//! hits both road and water keywords) and the earlier one always wins.
//!
//! Built-in order, pinned:
//! road, waste, water, lighting, noise, then the general default.
//!
//! A table is validated once when built and is read-only afterwards.
//! The built-in table is constructed lazily on first use and shared
//! process-wide through an `Arc`.

use crate::error::{Result, TriageError};
use crate::priority::Priority;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Upper bound for a rule's declared base confidence.
/// Results are still capped at the evidence ceiling.
pub const MAX_BASE_CONFIDENCE: f64 = 1.0;

/// Keyword rule mapping a complaint onto classification fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Short identifier, used in traces and listings
    pub name: String,
    /// Lowercase substrings; any hit selects the rule
    #[serde(default)]
    pub keywords: Vec<String>,
    pub issue_type: String,
    pub urgency_label: String,
    pub category: String,
    pub subcategory: String,
    pub priority: Priority,
    pub base_confidence: f64,
    pub department: String,
    pub estimated_resolution_time: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CategoryRule {
    fn validate(&self, is_default: bool) -> Result<()> {
        let fields: [(&'static str, &str); 7] = [
            ("name", &self.name),
            ("issue_type", &self.issue_type),
            ("urgency_label", &self.urgency_label),
            ("category", &self.category),
            ("subcategory", &self.subcategory),
            ("department", &self.department),
            ("estimated_resolution_time", &self.estimated_resolution_time),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(TriageError::BlankField {
                    rule: self.name.clone(),
                    field,
                });
            }
        }

        if !self.base_confidence.is_finite()
            || self.base_confidence < 0.0
            || self.base_confidence > MAX_BASE_CONFIDENCE
        {
            return Err(TriageError::ConfidenceOutOfRange {
                rule: self.name.clone(),
                value: self.base_confidence,
                max: MAX_BASE_CONFIDENCE,
            });
        }

        if is_default {
            if !self.keywords.is_empty() {
                return Err(TriageError::DefaultHasKeywords {
                    rule: self.name.clone(),
                });
            }
            return Ok(());
        }

        if self.keywords.is_empty() {
            return Err(TriageError::EmptyKeywords {
                rule: self.name.clone(),
            });
        }
        if self.keywords.iter().any(|kw| kw.trim().is_empty()) {
            return Err(TriageError::BlankKeyword {
                rule: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Matching runs on lowercased text, so keywords must be lowercase too
    fn normalize_keywords(&mut self) {
        for kw in &mut self.keywords {
            *kw = kw.to_lowercase();
        }
    }
}

/// Ordered category rules plus the catch-all default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleTable {
    #[serde(rename = "category")]
    categories: Vec<CategoryRule>,
    default: CategoryRule,
}

/// On-disk shape of a rule table file
#[derive(Deserialize)]
struct RuleTableFile {
    #[serde(default)]
    category: Vec<CategoryRule>,
    default: CategoryRule,
}

static BUILTIN: Lazy<Arc<RuleTable>> = Lazy::new(|| {
    debug!("Building built-in category rule table");
    Arc::new(RuleTable {
        categories: vec![
            road_infrastructure(),
            waste_management(),
            water_infrastructure(),
            street_lighting(),
            noise_complaint(),
        ],
        default: general_complaint(),
    })
});

impl RuleTable {
    /// Build a validated table. Keywords are lowercased.
    pub fn new(categories: Vec<CategoryRule>, default: CategoryRule) -> Result<Self> {
        let mut categories = categories;
        for rule in &mut categories {
            rule.normalize_keywords();
            rule.validate(false)?;
        }
        default.validate(true)?;

        Ok(Self { categories, default })
    }

    /// Process-wide built-in table
    pub fn builtin() -> Arc<RuleTable> {
        Arc::clone(&BUILTIN)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RuleTableFile = toml::from_str(content)?;
        Self::new(file.category, file.default)
    }

    /// Load a rule table file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        debug!(
            "Loaded {} category rules from {}",
            table.categories.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Category rules in evaluation order, default excluded
    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    pub fn default_rule(&self) -> &CategoryRule {
        &self.default
    }

    /// Every rule in evaluation order, default last
    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.categories.iter().chain(std::iter::once(&self.default))
    }

    pub fn len(&self) -> usize {
        self.categories.len() + 1
    }

    /// Always false: the default rule is always present
    pub fn is_empty(&self) -> bool {
        false
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn road_infrastructure() -> CategoryRule {
    CategoryRule {
        name: "road_infrastructure".to_string(),
        keywords: strings(&["pothole", "road damage", "street", "pavement"]),
        issue_type: "Road Damage".to_string(),
        urgency_label: "High".to_string(),
        category: "infrastructure".to_string(),
        subcategory: "road_maintenance".to_string(),
        priority: Priority::High,
        base_confidence: 0.9,
        department: "Roads & Transportation".to_string(),
        estimated_resolution_time: "3-5 days".to_string(),
        tags: strings(&["road", "infrastructure", "public_safety"]),
    }
}

fn waste_management() -> CategoryRule {
    CategoryRule {
        name: "waste_management".to_string(),
        keywords: strings(&["garbage", "waste", "trash", "litter"]),
        issue_type: "Waste Management".to_string(),
        urgency_label: "Medium".to_string(),
        category: "sanitation".to_string(),
        subcategory: "waste_collection".to_string(),
        priority: Priority::Medium,
        base_confidence: 0.85,
        department: "Sanitation Department".to_string(),
        estimated_resolution_time: "1-2 days".to_string(),
        tags: strings(&["waste", "sanitation", "public_health"]),
    }
}

fn water_infrastructure() -> CategoryRule {
    CategoryRule {
        name: "water_infrastructure".to_string(),
        keywords: strings(&["water", "leak", "pipe", "flooding"]),
        issue_type: "Water Supply Issue".to_string(),
        urgency_label: "High".to_string(),
        category: "utilities".to_string(),
        subcategory: "water_supply".to_string(),
        priority: Priority::High,
        base_confidence: 0.88,
        department: "Water Department".to_string(),
        estimated_resolution_time: "1-3 days".to_string(),
        tags: strings(&["water", "utilities", "infrastructure"]),
    }
}

fn street_lighting() -> CategoryRule {
    CategoryRule {
        name: "street_lighting".to_string(),
        keywords: strings(&["light", "lamp", "dark", "electricity"]),
        issue_type: "Street Lighting".to_string(),
        urgency_label: "Medium".to_string(),
        category: "utilities".to_string(),
        subcategory: "street_lighting".to_string(),
        priority: Priority::Medium,
        base_confidence: 0.82,
        department: "Electrical Department".to_string(),
        estimated_resolution_time: "2-4 days".to_string(),
        tags: strings(&["lighting", "utilities", "public_safety"]),
    }
}

fn noise_complaint() -> CategoryRule {
    CategoryRule {
        name: "noise_complaint".to_string(),
        keywords: strings(&["noise", "loud", "sound"]),
        issue_type: "Noise Complaint".to_string(),
        urgency_label: "Low".to_string(),
        category: "public_order".to_string(),
        subcategory: "noise_pollution".to_string(),
        priority: Priority::Low,
        base_confidence: 0.8,
        department: "Environmental Services".to_string(),
        estimated_resolution_time: "1-2 days".to_string(),
        tags: strings(&["noise", "public_order"]),
    }
}

fn general_complaint() -> CategoryRule {
    CategoryRule {
        name: "general_complaint".to_string(),
        keywords: Vec::new(),
        issue_type: "General Complaint".to_string(),
        urgency_label: "Low".to_string(),
        category: "general".to_string(),
        subcategory: "other".to_string(),
        priority: Priority::Low,
        base_confidence: 0.7,
        department: "General Services".to_string(),
        estimated_resolution_time: "5-7 days".to_string(),
        tags: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::NormalizedText;

    #[test]
    fn test_builtin_order_is_pinned() {
        let table = RuleTable::builtin();
        let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "road_infrastructure",
                "waste_management",
                "water_infrastructure",
                "street_lighting",
                "noise_complaint",
                "general_complaint",
            ]
        );
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = RuleTable::builtin();
        let b = RuleTable::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_builtin_tables_validate() {
        let table = RuleTable::builtin();
        let rebuilt = RuleTable::new(
            table.categories().to_vec(),
            table.default_rule().clone(),
        );
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_default_rule_fields() {
        let table = RuleTable::builtin();
        let d = table.default_rule();
        assert_eq!(d.issue_type, "General Complaint");
        assert_eq!(d.category, "general");
        assert_eq!(d.priority, Priority::Low);
        assert_eq!(d.base_confidence, 0.7);
        assert_eq!(d.department, "General Services");
        assert_eq!(d.estimated_resolution_time, "5-7 days");
        assert!(d.tags.is_empty());
        assert!(d.keywords.is_empty());
    }

    #[test]
    fn test_keyword_order_within_rule() {
        let rule = water_infrastructure();
        let hit = |s: &str| NormalizedText::new(s).first_hit(&rule.keywords).map(str::to_string);
        assert_eq!(hit("a leaking pipe").as_deref(), Some("leak"));
        assert_eq!(hit("Pipe burst, WATER everywhere").as_deref(), Some("water"));
        assert_eq!(hit("nothing here"), None);
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let mut rule = noise_complaint();
        rule.keywords = strings(&["Barking"]);
        let table = RuleTable::new(vec![rule], general_complaint()).unwrap();
        assert_eq!(table.categories()[0].keywords, vec!["barking"]);
    }

    #[test]
    fn test_rejects_rule_without_keywords() {
        let mut rule = noise_complaint();
        rule.keywords.clear();
        let err = RuleTable::new(vec![rule], general_complaint()).unwrap_err();
        assert!(matches!(err, TriageError::EmptyKeywords { .. }));
    }

    #[test]
    fn test_rejects_blank_keyword() {
        let mut rule = noise_complaint();
        rule.keywords.push("  ".to_string());
        let err = RuleTable::new(vec![rule], general_complaint()).unwrap_err();
        assert!(matches!(err, TriageError::BlankKeyword { .. }));
    }

    #[test]
    fn test_confidence_range() {
        let mut rule = noise_complaint();
        rule.base_confidence = 1.0;
        assert!(RuleTable::new(vec![rule], general_complaint()).is_ok());

        let mut rule = noise_complaint();
        rule.base_confidence = 1.01;
        let err = RuleTable::new(vec![rule], general_complaint()).unwrap_err();
        assert!(matches!(err, TriageError::ConfidenceOutOfRange { .. }));

        let mut rule = noise_complaint();
        rule.base_confidence = -0.1;
        assert!(RuleTable::new(vec![rule], general_complaint()).is_err());

        let mut rule = noise_complaint();
        rule.base_confidence = f64::NAN;
        assert!(RuleTable::new(vec![rule], general_complaint()).is_err());
    }

    #[test]
    fn test_rejects_default_with_keywords() {
        let mut default = general_complaint();
        default.keywords = strings(&["misc"]);
        let err = RuleTable::new(vec![], default).unwrap_err();
        assert!(matches!(err, TriageError::DefaultHasKeywords { .. }));
    }

    #[test]
    fn test_rejects_blank_department() {
        let mut rule = waste_management();
        rule.department = " ".to_string();
        let err = RuleTable::new(vec![rule], general_complaint()).unwrap_err();
        match err {
            TriageError::BlankField { field, .. } => assert_eq!(field, "department"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_table_with_only_default_is_valid() {
        let table = RuleTable::new(vec![], general_complaint()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.categories().is_empty());
    }

    #[test]
    fn test_toml_export_reloads_identically() {
        let table = RuleTable::builtin();
        let toml_str = table.to_toml_string().unwrap();
        assert!(toml_str.contains("[[category]]"));
        assert!(toml_str.contains("[default]"));

        let reloaded = RuleTable::from_toml_str(&toml_str).unwrap();
        assert_eq!(&reloaded, table.as_ref());
    }

    #[test]
    fn test_toml_requires_default() {
        let content = r#"
[[category]]
name = "parks"
keywords = ["park"]
issue_type = "Parks"
urgency_label = "Low"
category = "recreation"
subcategory = "parks"
priority = "low"
base_confidence = 0.75
department = "Parks Department"
estimated_resolution_time = "7 days"
"#;
        let err = RuleTable::from_toml_str(content).unwrap_err();
        assert!(matches!(err, TriageError::Toml(_)));
    }
}
