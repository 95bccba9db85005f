//! Optional-step clarity in command definitions.
//!
//! A step labeled "(Optional)" was routinely skipped despite being
//! conditionally mandatory. Any step heading carrying the label must be
//! followed, within a bounded lookahead window, by a recognized positive
//! execution condition.

use crate::core::report::{Severity, VerdictReport, Violation};
use crate::core::scan;
use regex::Regex;
use serde_json::json;
use std::path::Path;
use std::sync::LazyLock;

pub const VALIDATOR_ID: &str = "optional-step-conditions";
pub const EDGE_CASE: &str = "EC005";

const COMMANDS_DIR: &str = "commands";

/// Lookahead window (characters) after an optional step heading in which a
/// condition phrase must appear.
const CONDITION_WINDOW: usize = 1000;

static OPTIONAL_STEP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)((?:###?\s+)?Step\s+\d+:?\s+[^\n]*\(Optional\))").expect("static regex")
});

static CONDITION_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)MUST\s+execute\s+if",
        r"(?i)Only\s+(?:execute|run)\s+if",
        r"(?i)Execute\s+when",
        r"(?i)Run\s+this\s+step\s+if",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

fn optional_step_title(line: &str) -> Option<&str> {
    OPTIONAL_STEP
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn has_clear_conditions(context: &str) -> bool {
    CONDITION_PHRASES.iter().any(|p| p.is_match(context))
}

/// Window of `content` starting at byte `start`, clamped to whole
/// characters.
fn lookahead_window(content: &str, start: usize) -> String {
    content[start..].chars().take(CONDITION_WINDOW).collect()
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

    for md_file in command_documents(&commands_dir) {
        files_checked += 1;
        let Ok(content) = std::fs::read_to_string(&md_file) else {
            continue;
        };

        let mut offset = 0usize;
        for (line_num, line) in content.lines().enumerate() {
            if let Some(title) = optional_step_title(line) {
                let context = lookahead_window(&content, offset);
                if !has_clear_conditions(&context) {
                    violations.push(
                        Violation::new(
                            scan::rel_display(project_root, &md_file),
                            Severity::Critical,
                            "Step labeled '(Optional)' lacks clear execution conditions",
                        )
                        .with_line(line_num as u32 + 1)
                        .with_extra("step_title", json!(title.trim()))
                        .with_extra("context", json!(line.trim())),
                    );
                }
            }
            offset += line.len() + 1;
        }
    }

    let summary = json!({
        "total_files_checked": files_checked,
        "violations_found": violations.len(),
    });
    let recommendations = vec![
        "Remove '(Optional)' label from conditionally-mandatory steps".to_string(),
        "Use explicit conditions: 'MUST execute if X' or 'Only run if Y'".to_string(),
        "Use positive conditions (execute if) not negative (skip unless)".to_string(),
        "Add verification checkpoint with bash validation".to_string(),
    ];

    VerdictReport::new(VALIDATOR_ID, EDGE_CASE, violations, summary, recommendations)
}

/// Command definitions live directly under commands/, never nested.
fn command_documents(commands_dir: &Path) -> Vec<std::path::PathBuf> {
    scan::list_files(commands_dir)
        .into_iter()
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("md"))
        .collect()
}
