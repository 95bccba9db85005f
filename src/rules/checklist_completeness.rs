//! Quality-checklist completeness for the dev agent definition.
//!
//! The checklist in `agents/dev.md` is the enforcement surface for every
//! other house rule, so each required phrase must be present in its
//! `## Quality Checklist` section. This is the one rule whose subject is a
//! single mandatory file: absence of the document is itself a critical
//! violation, not a structural pass.

use crate::core::report::{Severity, VerdictReport, Violation};
use serde_json::json;
use std::path::Path;

pub const VALIDATOR_ID: &str = "checklist-completeness";
pub const EDGE_CASE: &str = "General";

const CHECKLIST_DOC: &str = "agents/dev.md";
const SECTION_HEADING: &str = "## Quality Checklist";

/// Requirements that must appear in the checklist section, matched as
/// case-insensitive substrings.
const REQUIRED_ITEMS: [&str; 7] = [
    "Todo script created",
    "No decimal step numbering",
    "source venv",
    "No hardcoded values",
    "Meaningful naming",
    "Git root cause",
    "Exit codes documented",
];

/// Slice of `content` from the checklist heading up to the next `##`
/// heading, or empty when the section is absent.
fn checklist_section(content: &str) -> Option<&str> {
    let start = content.find(SECTION_HEADING)?;
    let body = &content[start..];
    match body[1..].find("\n##") {
        Some(end) => Some(&body[..end + 1]),
        None => Some(body),
    }
}

pub fn validate(project_root: &Path) -> VerdictReport {
    let doc_path = project_root.join(CHECKLIST_DOC);
    if !doc_path.exists() {
        return VerdictReport::new(
            VALIDATOR_ID,
            EDGE_CASE,
            vec![Violation::new(
                CHECKLIST_DOC,
                Severity::Critical,
                "File not found",
            )],
            json!({
                "required_items": REQUIRED_ITEMS.len(),
                "found_items": 0,
                "missing_items": REQUIRED_ITEMS.len(),
            }),
            vec![format!(
                "Create {} with complete Quality Checklist",
                CHECKLIST_DOC
            )],
        );
    }

    let mut violations = Vec::new();
    let mut missing_items: Vec<&str> = Vec::new();

    match std::fs::read_to_string(&doc_path) {
        Ok(content) => {
            let section = match checklist_section(&content) {
                Some(section) => section.to_lowercase(),
                None => {
                    violations.push(Violation::new(
                        CHECKLIST_DOC,
                        Severity::Critical,
                        "Quality Checklist section not found",
                    ));
                    String::new()
                }
            };

            for required_item in REQUIRED_ITEMS {
                if !section.contains(&required_item.to_lowercase()) {
                    missing_items.push(required_item);
                    violations.push(
                        Violation::new(
                            CHECKLIST_DOC,
                            Severity::Major,
                            format!("Required checklist item '{}' not found", required_item),
                        )
                        .with_extra("missing_item", json!(required_item)),
                    );
                }
            }
        }
        Err(err) => {
            violations.push(Violation::new(
                CHECKLIST_DOC,
                Severity::Critical,
                format!("Error reading file: {}", err),
            ));
            missing_items.extend(REQUIRED_ITEMS);
        }
    }

    let summary = json!({
        "required_items": REQUIRED_ITEMS.len(),
        "found_items": REQUIRED_ITEMS.len() - missing_items.len(),
        "missing_items": missing_items.len(),
    });
    let recommendations = vec![
        format!("Add missing items to Quality Checklist in {}", CHECKLIST_DOC),
        format!("Ensure checklist is within '{}' section", SECTION_HEADING),
        if missing_items.is_empty() {
            "All required items present".to_string()
        } else {
            format!("Missing: {}", missing_items.join(", "))
        },
    ];

    VerdictReport::new(VALIDATOR_ID, EDGE_CASE, violations, summary, recommendations)
}
