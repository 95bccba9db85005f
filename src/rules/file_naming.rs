//! Kebab-case naming for the documentation tree.
//!
//! Mixed UPPERCASE, snake_case, and kebab-case names crept into docs/
//! without enforcement. Markdown files must be lowercase tokens joined by
//! single hyphens with one extension; a short allow-list of conventional
//! uppercase names is exempt.

use crate::core::report::{Severity, VerdictReport, Violation};
use crate::core::scan;
use regex::Regex;
use serde_json::json;
use std::path::Path;
use std::sync::LazyLock;

pub const VALIDATOR_ID: &str = "file-naming";
pub const EDGE_CASE: &str = "EC007";

const DOCS_DIR: &str = "docs";

const SPECIAL_FILES: [&str; 6] = [
    "README.md",
    "INDEX.md",
    "LICENSE",
    "AGENTS.md",
    "ARCHITECTURE.md",
    "CONTRIBUTING.md",
];

static KEBAB_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*\.[a-z]+$").expect("static regex"));

fn is_kebab_case(name: &str) -> bool {
    KEBAB_CASE.is_match(name)
}

fn is_special_file(name: &str) -> bool {
    SPECIAL_FILES.contains(&name)
}

/// Uppercase takes precedence over underscore when classifying a failure.
fn classify_issue(name: &str) -> &'static str {
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        "UPPERCASE or CamelCase"
    } else if name.contains('_') {
        "snake_case"
    } else {
        "non-standard naming"
    }
}

fn suggested_name(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}

pub fn validate(project_root: &Path) -> VerdictReport {
    let docs_dir = project_root.join(DOCS_DIR);
    if !docs_dir.exists() {
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

    for md_file in scan::collect_with_extensions(&docs_dir, &["md"]) {
        files_checked += 1;
        let filename = match md_file.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if is_special_file(filename) || is_kebab_case(filename) {
            continue;
        }

        violations.push(
            Violation::new(
                scan::rel_display(project_root, &md_file),
                Severity::Minor,
                format!("File name '{}' does not follow kebab-case", filename),
            )
            .with_extra("current_name", json!(filename))
            .with_extra("issue", json!(classify_issue(filename)))
            .with_extra("suggested_name", json!(suggested_name(filename))),
        );
    }

    let summary = json!({
        "total_files_checked": files_checked,
        "violations_found": violations.len(),
    });
    let recommendations = vec![
        "Rename files to kebab-case: lowercase-with-hyphens.md".to_string(),
        "Keep special files UPPERCASE: README.md, INDEX.md, AGENTS.md".to_string(),
        "Use the clean workflow to normalize naming automatically".to_string(),
    ];

    VerdictReport::new(VALIDATOR_ID, EDGE_CASE, violations, summary, recommendations)
}
