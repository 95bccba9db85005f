//! Derived-artifact retention for workflow output directories.
//!
//! Completed workflow reports accumulate in docs/dev/ and docs/clean/
//! unless archived. Structured outputs past the retention threshold get a
//! suggested destination under the `{category}-YYYY-MM` convention.
//!
//! `validate_at` takes an explicit `now` and is deterministic for a fixed
//! timestamp; the public entry point reads the wall clock.

use crate::core::report::{Severity, VerdictReport, Violation};
use crate::core::scan;
use crate::core::time;
use serde_json::json;
use std::path::Path;
use std::time::SystemTime;

pub const VALIDATOR_ID: &str = "report-retention";
pub const EDGE_CASE: &str = "General";

const WORKFLOW_DIRS: [&str; 2] = ["docs/dev", "docs/clean"];

/// Archive destination proposed for an overdue report, relative to the
/// project root. `YYYY-MM` is left for the archiver to fill in.
fn suggested_archive_path(workflow_dir: &str, file_name: &str) -> String {
    let category = Path::new(workflow_dir)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("reports");
    format!("{}/archive/{}-YYYY-MM/{}", workflow_dir, category, file_name)
}

pub fn validate(project_root: &Path, max_age_days: u64) -> VerdictReport {
    validate_at(project_root, max_age_days, SystemTime::now())
}

pub fn validate_at(project_root: &Path, max_age_days: u64, now: SystemTime) -> VerdictReport {
    let mut violations = Vec::new();
    let mut files_checked = 0usize;

    for workflow_dir in WORKFLOW_DIRS {
        let dir = project_root.join(workflow_dir);
        if !dir.exists() {
            continue;
        }

        for json_file in scan::list_files(&dir) {
            if json_file.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let relative = scan::relative_path(project_root, &json_file);
            if scan::is_archived(relative) {
                continue;
            }

            files_checked += 1;
            let Ok(metadata) = json_file.metadata() else {
                continue;
            };
            let Ok(mtime) = metadata.modified() else {
                continue;
            };

            let age_days = time::age_days(now, mtime);
            if age_days > max_age_days as f64 {
                let file_name = json_file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default();
                violations.push(
                    Violation::new(
                        scan::rel_display(project_root, &json_file),
                        Severity::Medium,
                        format!("Workflow JSON older than {} days not archived", max_age_days),
                    )
                    .with_extra("age_days", json!(age_days as u64))
                    .with_extra(
                        "suggested_archive_path",
                        json!(suggested_archive_path(workflow_dir, file_name)),
                    ),
                );
            }
        }
    }

    let summary = json!({
        "total_files_checked": files_checked,
        "violations_found": violations.len(),
    });
    let recommendations = vec![
        "Archive old workflow JSONs to docs/{workflow}/archive/YYYY-MM/".to_string(),
        "Use the clean workflow to archive automatically".to_string(),
        format!(
            "Retention policy: keep {} days, archive older, delete after 90 days",
            max_age_days
        ),
    ];

    VerdictReport::new(VALIDATOR_ID, EDGE_CASE, violations, summary, recommendations)
}
