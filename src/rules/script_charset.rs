//! Restricted character set for functional files.
//!
//! Shell, interpreter, and structured-data files are English-only; CJK
//! ideographs belong in documentation, not in code paths. Documentation
//! and virtual-environment trees are exempt, and test trees are only
//! scanned where they hold scripts.

use crate::core::report::{Severity, VerdictReport, Violation};
use crate::core::scan;
use regex::Regex;
use serde_json::json;
use std::path::{Component, Path};
use std::sync::LazyLock;

pub const VALIDATOR_ID: &str = "script-charset";
pub const EDGE_CASE: &str = "EC006";

const EXTENSIONS: [&str; 3] = ["sh", "py", "json"];

/// CJK Unified Ideographs block.
static CJK_IDEOGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{4e00}-\x{9fff}]").expect("static regex"));

fn has_cjk(text: &str) -> bool {
    CJK_IDEOGRAPH.is_match(text)
}

/// First 100 characters of the offending line, for triage.
fn echo_content(line: &str) -> String {
    line.trim().chars().take(100).collect()
}

/// Scope predicate over the root-relative path: docs/ and venv/ are out,
/// and under test trees only scripts/ subtrees are in.
fn in_scope(relative: &Path) -> bool {
    let parts: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    if parts.iter().any(|p| *p == "docs" || *p == "venv") {
        return false;
    }
    if parts.iter().any(|p| *p == "test" || *p == "tests") && !parts.contains(&"scripts") {
        return false;
    }
    true
}

pub fn validate(project_root: &Path) -> VerdictReport {
    let mut violations = Vec::new();
    let mut files_checked = 0usize;

    for file_path in scan::collect_with_extensions(project_root, &EXTENSIONS) {
        let relative = scan::relative_path(project_root, &file_path);
        if !in_scope(relative) {
            continue;
        }

        files_checked += 1;
        let Ok(content) = std::fs::read_to_string(&file_path) else {
            continue;
        };

        for (line_num, line) in content.lines().enumerate() {
            if has_cjk(line) {
                violations.push(
                    Violation::new(
                        scan::rel_display(project_root, &file_path),
                        Severity::Major,
                        "Chinese characters in functional code",
                    )
                    .with_line(line_num as u32 + 1)
                    .with_extra("content", json!(echo_content(line))),
                );
            }
        }
    }

    let summary = json!({
        "total_files_checked": files_checked,
        "violations_found": violations.len(),
    });
    let recommendations = vec![
        "Translate Chinese content to English".to_string(),
        "Move bilingual documentation to docs/ (allowed there)".to_string(),
        "Archive legacy files to docs/archive/legacy-chinese/".to_string(),
        "Use English-only for .sh, .py, .json files".to_string(),
    ];

    VerdictReport::new(VALIDATOR_ID, EDGE_CASE, violations, summary, recommendations)
}
