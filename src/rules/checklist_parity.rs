//! Step parity between command documents and checklist scripts.
//!
//! Multi-step workflows must ship a checklist generator, and the generator
//! must emit exactly one item per step. Headings inside fenced code
//! examples do not count as steps.

use crate::core::report::{Severity, VerdictReport, Violation};
use crate::core::scan;
use regex::Regex;
use serde_json::json;
use std::path::Path;
use std::sync::LazyLock;

pub const VALIDATOR_ID: &str = "checklist-parity";
pub const EDGE_CASE: &str = "EC003";

const COMMANDS_DIR: &str = "commands";
const TODO_SCRIPT_DIR: &str = "scripts/todo";

/// A workflow with at least this many steps requires a checklist script.
const STEP_THRESHOLD: usize = 3;

static STEP_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:###?\s+Step\s+\d+|Step\s+\d+:)").expect("static regex"));

/// One checklist item as emitted by a generator script.
const ITEM_MARKER: &str = "{\"content\":";

/// Count step headings, skipping fenced code regions.
fn count_workflow_steps(content: &str) -> usize {
    let mut in_fence = false;
    let mut count = 0;
    for line in content.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if !in_fence && STEP_HEADING.is_match(line) {
            count += 1;
        }
    }
    count
}

fn count_checklist_items(script_content: &str) -> usize {
    script_content.matches(ITEM_MARKER).count()
}

pub fn validate(project_root: &Path) -> VerdictReport {
    let commands_dir = project_root.join(COMMANDS_DIR);
    let todo_dir = project_root.join(TODO_SCRIPT_DIR);

    if !commands_dir.exists() {
        return VerdictReport::new(
            VALIDATOR_ID,
            EDGE_CASE,
            Vec::new(),
            json!({"total_commands_checked": 0, "violations_found": 0}),
            Vec::new(),
        );
    }

    let mut violations = Vec::new();
    let mut files_checked = 0usize;

    for cmd_file in scan::list_files(&commands_dir) {
        if cmd_file.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        files_checked += 1;
        let Ok(content) = std::fs::read_to_string(&cmd_file) else {
            continue;
        };

        let step_count = count_workflow_steps(&content);
        if step_count < STEP_THRESHOLD {
            continue;
        }

        let stem = cmd_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let todo_script = todo_dir.join(format!("{}.py", stem));

        if !todo_script.is_file() {
            violations.push(
                Violation::new(
                    scan::rel_display(project_root, &cmd_file),
                    Severity::Critical,
                    format!("Command has {} steps but no todo script", step_count),
                )
                .with_extra("steps", json!(step_count))
                .with_extra(
                    "missing_todo_script",
                    json!(scan::rel_display(project_root, &todo_script)),
                ),
            );
            continue;
        }

        let Ok(todo_content) = std::fs::read_to_string(&todo_script) else {
            continue;
        };
        let todo_count = count_checklist_items(&todo_content);
        if todo_count != step_count {
            violations.push(
                Violation::new(
                    scan::rel_display(project_root, &cmd_file),
                    Severity::Major,
                    format!(
                        "Step count mismatch: {} in command vs {} in todo",
                        step_count, todo_count
                    ),
                )
                .with_extra("steps_in_command", json!(step_count))
                .with_extra("steps_in_todo", json!(todo_count))
                .with_extra(
                    "todo_script",
                    json!(scan::rel_display(project_root, &todo_script)),
                ),
            );
        }
    }

    let summary = json!({
        "total_commands_checked": files_checked,
        "violations_found": violations.len(),
    });
    let recommendations = vec![
        "Create todo script: scripts/todo/{command-name}.py".to_string(),
        "Use an existing generator such as scripts/todo/dev.py as template".to_string(),
        "Ensure todo script step count matches command step count".to_string(),
    ];

    VerdictReport::new(VALIDATOR_ID, EDGE_CASE, violations, summary, recommendations)
}
