//! Stale-file retention for the debug working directory.
//!
//! Debug output once accumulated for months unnoticed. Every non-archived
//! file under `debug/` must be younger than the retention threshold; the
//! summary aggregates the reclaimable size so remediation is sized up
//! front.
//!
//! The public entry point reads the wall clock; `validate_at` takes an
//! explicit `now` and is deterministic for a fixed timestamp.

use crate::core::report::{Severity, VerdictReport, Violation};
use crate::core::scan;
use crate::core::time;
use serde_json::json;
use std::path::Path;
use std::time::SystemTime;

pub const VALIDATOR_ID: &str = "stale-file-age";
pub const EDGE_CASE: &str = "EC008";

const DEBUG_DIR: &str = "debug";

pub fn validate(project_root: &Path, max_age_days: u64) -> VerdictReport {
    validate_at(project_root, max_age_days, SystemTime::now())
}

pub fn validate_at(project_root: &Path, max_age_days: u64, now: SystemTime) -> VerdictReport {
    let debug_dir = project_root.join(DEBUG_DIR);
    if !debug_dir.exists() {
        return VerdictReport::new(
            VALIDATOR_ID,
            EDGE_CASE,
            Vec::new(),
            json!({
                "total_files_checked": 0,
                "violations_found": 0,
                "oldest_file_days": 0,
            }),
            Vec::new(),
        );
    }

    let mut violations = Vec::new();
    let mut files_checked = 0usize;
    let mut total_size: u64 = 0;
    let mut oldest_file_days = 0.0f64;

    for file_path in scan::collect_files(&debug_dir) {
        let relative = scan::relative_path(&debug_dir, &file_path);
        if scan::is_archived(relative) {
            continue;
        }

        let Ok(metadata) = file_path.metadata() else {
            continue;
        };
        let Ok(mtime) = metadata.modified() else {
            continue;
        };

        files_checked += 1;
        let age_days = time::age_days(now, mtime);
        oldest_file_days = oldest_file_days.max(age_days);

        if age_days > max_age_days as f64 {
            total_size += metadata.len();
            violations.push(
                Violation::new(
                    scan::rel_display(project_root, &file_path),
                    Severity::Critical,
                    format!("File older than {} days", max_age_days),
                )
                .with_extra("age_days", json!(age_days as u64))
                .with_extra("size_bytes", json!(metadata.len()))
                .with_extra("last_modified", json!(time::epoch_z(mtime))),
            );
        }
    }

    let total_size_mb = round2(total_size as f64 / (1024.0 * 1024.0));
    let summary = json!({
        "total_files_checked": files_checked,
        "violations_found": violations.len(),
        "total_size_mb": total_size_mb,
        "oldest_file_days": oldest_file_days as u64,
        "max_age_days": max_age_days,
    });
    let recommendations = vec![
        format!(
            "Archive files older than {} days to debug/archive-YYYY-MM/",
            max_age_days
        ),
        format!("Total space to free: {} MB", total_size_mb),
        "Use the clean workflow to archive old debug files automatically".to_string(),
        "Consider setting up automated cleanup (cron/systemd timer)".to_string(),
    ];

    VerdictReport::new(VALIDATOR_ID, EDGE_CASE, violations, summary, recommendations)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
