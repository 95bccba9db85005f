//! Decimal step numbering ban in command definitions.
//!
//! Decimal steps (Step 3.5) were explicitly prohibited and still slipped
//! into a shipped workflow. Any integer-dot-integer step reference is a
//! violation, wherever it appears on the line.

use crate::core::report::{Severity, VerdictReport, Violation};
use crate::core::scan;
use regex::Regex;
use serde_json::json;
use std::path::Path;
use std::sync::LazyLock;

pub const VALIDATOR_ID: &str = "step-numbering";
pub const EDGE_CASE: &str = "EC004";

const COMMANDS_DIR: &str = "commands";

static DECIMAL_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(Step\s+\d+\.\d+)").expect("static regex"));

fn decimal_step(line: &str) -> Option<&str> {
    DECIMAL_STEP
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn validate(project_root: &Path) -> VerdictReport {
    let commands_dir = project_root.join(COMMANDS_DIR);
    if !commands_dir.exists() {
        return VerdictReport::new(
            VALIDATOR_ID,
            EDGE_CASE,
            Vec::new(),
            json!({"total_files_checked": 0, "violations_found": 0}),
            Vec::new(),
        );
    }

    let mut violations = Vec::new();
    let mut files_checked = 0usize;

    for md_file in scan::list_files(&commands_dir) {
        if md_file.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        files_checked += 1;
        let Ok(content) = std::fs::read_to_string(&md_file) else {
            continue;
        };

        for (line_num, line) in content.lines().enumerate() {
            if let Some(matched) = decimal_step(line) {
                violations.push(
                    Violation::new(
                        scan::rel_display(project_root, &md_file),
                        Severity::Critical,
                        "Decimal step numbering is prohibited",
                    )
                    .with_line(line_num as u32 + 1)
                    .with_extra("pattern", json!(matched))
                    .with_extra(
                        "expected",
                        json!("Use integer step numbering: Step 1, Step 2, Step 3"),
                    )
                    .with_extra("context", json!(line.trim())),
                );
            }
        }
    }

    let summary = json!({
        "total_files_checked": files_checked,
        "violations_found": violations.len(),
    });
    let recommendations = vec![
        "Renumber steps to use sequential integers only".to_string(),
        "Update todo scripts (scripts/todo/*.py) to match step count".to_string(),
        "See agents/dev.md Quality Checklist for enforcement".to_string(),
    ];

    VerdictReport::new(VALIDATOR_ID, EDGE_CASE, violations, summary, recommendations)
}
