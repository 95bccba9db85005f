//! Protected-file allow-list enforcement.
//!
//! The cleanliness inspector once recommended relocating an official
//! entrypoint file into docs/. Both policing documents must therefore name
//! each official file near a protection keyword, and no live inspection
//! report may flag one for relocation.

use crate::core::report::{Severity, VerdictReport, Violation};
use crate::core::scan;
use regex::Regex;
use serde_json::json;
use std::path::Path;

pub const VALIDATOR_ID: &str = "protected-files";
pub const EDGE_CASE: &str = "EC001";

const OFFICIAL_FILES: [&str; 3] = ["AGENTS.md", "README.md", "ARCHITECTURE.md"];

const INSPECTOR_DOC: &str = "agents/cleanliness-inspector.md";
const CLEAN_COMMAND_DOC: &str = "commands/clean.md";
const REPORTS_DIR: &str = "docs/clean";

/// True when `filename` appears on a line-ish span after one of the
/// protection keywords.
fn is_file_protected(content: &str, filename: &str) -> bool {
    let pattern = format!(
        r"(?i)(?:ALLOWED|official|preserve|protect).*{}",
        regex::escape(filename)
    );
    Regex::new(&pattern)
        .expect("static protection regex")
        .is_match(content)
}

fn check_policing_document(
    project_root: &Path,
    doc: &str,
    severity: Severity,
    reason_suffix: &str,
    violations: &mut Vec<Violation>,
) {
    let path = project_root.join(doc);
    if !path.exists() {
        return;
    }
    let Ok(content) = std::fs::read_to_string(&path) else {
        return;
    };
    for official_file in OFFICIAL_FILES {
        if !is_file_protected(&content, official_file) {
            violations.push(
                Violation::new(
                    doc,
                    severity,
                    format!("{} {}", official_file, reason_suffix),
                )
                .with_extra("missing_protection", json!(official_file)),
            );
        }
    }
}

/// Structured reports must not list an official filename under the
/// relocation-recommended finding category.
fn check_inspection_reports(project_root: &Path, violations: &mut Vec<Violation>) {
    let reports_dir = project_root.join(REPORTS_DIR);
    if !reports_dir.exists() {
        return;
    }
    for report_path in scan::list_files(&reports_dir) {
        let name = report_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        if !name.contains("-report-") || !name.ends_with(".json") {
            continue;
        }
        let relative = scan::relative_path(project_root, &report_path);
        if scan::is_archived(relative) {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&report_path) else {
            continue;
        };
        let Ok(report) = serde_json::from_str::<serde_json::Value>(&content) else {
            continue;
        };
        let Some(misplaced) = report["findings"]["misplaced_docs"].as_array() else {
            continue;
        };
        for item in misplaced {
            let flagged = item["file"].as_str().unwrap_or("");
            if OFFICIAL_FILES
                .iter()
                .any(|official| flagged.contains(official))
            {
                violations.push(
                    Violation::new(
                        scan::rel_display(project_root, &report_path),
                        Severity::Critical,
                        "Official file flagged for relocation in inspection report",
                    )
                    .with_extra("recommended_relocation", json!(flagged)),
                );
            }
        }
    }
}

pub fn validate(project_root: &Path) -> VerdictReport {
    let mut violations = Vec::new();

    check_policing_document(
        project_root,
        INSPECTOR_DOC,
        Severity::Critical,
        "not explicitly listed in official files allow-list",
        &mut violations,
    );
    check_policing_document(
        project_root,
        CLEAN_COMMAND_DOC,
        Severity::Major,
        "not mentioned in documentation structure rules",
        &mut violations,
    );
    check_inspection_reports(project_root, &mut violations);

    let summary = json!({
        "official_files_checked": OFFICIAL_FILES.len(),
        "violations_found": violations.len(),
    });
    let recommendations = vec![
        format!("Add official files to allow-list in {}", INSPECTOR_DOC),
        format!("Document official files in {} Step 1", CLEAN_COMMAND_DOC),
        "Format: 'ALLOWED: README.md, ARCHITECTURE.md, AGENTS.md (official files)'".to_string(),
        "Review and update inspection reports to remove relocation recommendations".to_string(),
    ];

    VerdictReport::new(VALIDATOR_ID, EDGE_CASE, violations, summary, recommendations)
}
