//! Terminal rendering for triage results and rule tables.

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use triage_engine::{ClassificationResult, Priority, RuleTable, TriageTrace};

/// Colour only when stdout is a terminal and NO_COLOR is unset
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn paint_priority(priority: Priority, color: bool) -> String {
    let label = priority.as_str().to_uppercase();
    if !color {
        return label;
    }
    match priority {
        Priority::Urgent => label.red().bold().to_string(),
        Priority::High => label.yellow().bold().to_string(),
        Priority::Medium => label.cyan().to_string(),
        Priority::Low => label.green().to_string(),
    }
}

fn heading(text: &str, color: bool) -> String {
    let padded = format!("{:<12}", text);
    if color {
        padded.dimmed().to_string()
    } else {
        padded
    }
}

pub fn render_result(result: &ClassificationResult, color: bool) -> String {
    let tags = if result.tags.is_empty() {
        "-".to_string()
    } else {
        result.tags.join(", ")
    };

    let rows = [
        (
            "Category",
            format!("{} / {}", result.category, result.subcategory),
        ),
        ("Issue", result.issue_type.clone()),
        (
            "Priority",
            format!(
                "{} ({})",
                paint_priority(result.priority, color),
                result.urgency_label
            ),
        ),
        ("Confidence", format!("{:.2}", result.confidence)),
        ("Department", result.department.clone()),
        ("Resolution", result.estimated_resolution_time.clone()),
        ("Agent", result.agent.to_string()),
        ("Tags", tags),
        ("Note", result.coordination_note.clone()),
    ];

    rows.iter()
        .map(|(name, value)| format!("{}{}", heading(name, color), value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_trace(trace: &TriageTrace, color: bool) -> String {
    let title = if color {
        "Trace".bold().to_string()
    } else {
        "Trace".to_string()
    };
    let mut out = vec![title];
    out.extend(trace.summary_lines().into_iter().map(|l| format!("  - {}", l)));
    out.join("\n")
}

pub fn render_rules(table: &RuleTable, color: bool) -> String {
    let mut out = Vec::new();

    for (idx, rule) in table.categories().iter().enumerate() {
        out.push(format!(
            "{}. {}  [{} {:.2}]  {}",
            idx + 1,
            rule.name,
            paint_priority(rule.priority, color),
            rule.base_confidence,
            rule.department
        ));
        out.push(format!("   keywords: {}", rule.keywords.join(", ")));
    }

    let default = table.default_rule();
    out.push(format!(
        "*. {}  [{} {:.2}]  {}  (default)",
        default.name,
        paint_priority(default.priority, color),
        default.base_confidence,
        default.department
    ));

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_engine::{classify, ClassificationInput, TriageEngine};

    #[test]
    fn test_plain_result_rendering() {
        let result = classify(&ClassificationInput::new("pothole").with_location("Ward 5"));
        let text = render_result(&result, false);

        assert!(text.contains("Category    infrastructure / road_maintenance"));
        assert!(text.contains("Priority    HIGH (High)"));
        assert!(text.contains("Confidence  0.90"));
        assert!(text.contains("Tags        road, infrastructure, public_safety, location:ward_5"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_empty_tags_render_as_dash() {
        let result = classify(&ClassificationInput::new("rude clerk"));
        assert!(render_result(&result, false).contains("Tags        -"));
    }

    #[test]
    fn test_colored_priority_has_escape_codes() {
        assert!(paint_priority(Priority::Urgent, true).contains('\u{1b}'));
        assert_eq!(paint_priority(Priority::Urgent, false), "URGENT");
    }

    #[test]
    fn test_trace_rendering() {
        let engine = TriageEngine::default();
        let explanation = engine.explain(&ClassificationInput::new("emergency trash").trusted());
        let text = render_trace(&explanation.trace, false);
        assert!(text.starts_with("Trace"));
        assert!(text.contains("rule #2 waste_management matched on 'trash'"));
        assert!(text.contains("escalated on 'emergency'"));
        assert!(text.contains("trusted reporter: confidence 0.85 -> 0.95"));
    }

    #[test]
    fn test_rules_listing_order() {
        let text = render_rules(&RuleTable::builtin(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("1. road_infrastructure"));
        assert_eq!(lines[1], "   keywords: pothole, road damage, street, pavement");
        assert!(lines.last().unwrap().contains("general_complaint"));
        assert!(lines.last().unwrap().ends_with("(default)"));
    }
}
