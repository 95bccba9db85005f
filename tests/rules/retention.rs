use std::time::{Duration, SystemTime};
use stickler::core::report::{Severity, VerdictStatus};
use stickler::rules::{report_retention, stale_files};
use tempfile::tempdir;

fn days(n: u64) -> Duration {
    Duration::from_secs(n * 24 * 60 * 60)
}

#[test]
fn test_stale_debug_file_records_age_size_and_timestamp() {
    let tmp = tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("debug")).unwrap();
    std::fs::write(tmp.path().join("debug/trace.log"), vec![b'x'; 4096]).unwrap();

    let report = stale_files::validate_at(tmp.path(), 30, SystemTime::now() + days(35));
    assert_eq!(report.status, VerdictStatus::Fail);
    let violation = &report.violations[0];
    assert_eq!(violation.file, "debug/trace.log");
    assert_eq!(violation.severity, Severity::Critical);
    assert_eq!(violation.extra["age_days"], 35);
    assert_eq!(violation.extra["size_bytes"], 4096);
    assert!(
        violation.extra["last_modified"]
            .as_str()
            .unwrap()
            .ends_with('Z')
    );
    assert_eq!(report.summary["max_age_days"], 30);
    assert!(report.summary["total_size_mb"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_custom_threshold_is_honored() {
    let tmp = tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("debug")).unwrap();
    std::fs::write(tmp.path().join("debug/trace.log"), "x").unwrap();

    let now = SystemTime::now() + days(10);
    assert_eq!(
        stale_files::validate_at(tmp.path(), 30, now).status,
        VerdictStatus::Pass
    );
    assert_eq!(
        stale_files::validate_at(tmp.path(), 7, now).status,
        VerdictStatus::Fail
    );
}

#[test]
fn test_archiving_a_violating_file_clears_the_next_scan() {
    let tmp = tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("debug")).unwrap();
    std::fs::write(tmp.path().join("debug/trace.log"), "x").unwrap();

    let now = SystemTime::now() + days(60);
    let before = stale_files::validate_at(tmp.path(), 30, now);
    assert_eq!(before.status, VerdictStatus::Fail);

    std::fs::create_dir_all(tmp.path().join("debug/archive-2026-08")).unwrap();
    std::fs::rename(
        tmp.path().join("debug/trace.log"),
        tmp.path().join("debug/archive-2026-08/trace.log"),
    )
    .unwrap();

    let after = stale_files::validate_at(tmp.path(), 30, now);
    assert_eq!(after.status, VerdictStatus::Pass);
    assert!(after.violations.is_empty());
}

#[test]
fn test_overdue_workflow_report_gets_archive_suggestion() {
    let tmp = tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("docs/dev")).unwrap();
    std::fs::create_dir_all(tmp.path().join("docs/clean")).unwrap();
    std::fs::write(tmp.path().join("docs/dev/run-report-001.json"), "{}").unwrap();
    std::fs::write(tmp.path().join("docs/clean/scan.json"), "{}").unwrap();

    let report = report_retention::validate_at(tmp.path(), 30, SystemTime::now() + days(45));
    assert_eq!(report.status, VerdictStatus::Fail);
    assert_eq!(report.violations.len(), 2);
    for violation in &report.violations {
        assert_eq!(violation.severity, Severity::Medium);
    }
    assert_eq!(
        report.violations[0].extra["suggested_archive_path"],
        "docs/dev/archive/dev-YYYY-MM/run-report-001.json"
    );
    assert_eq!(
        report.violations[1].extra["suggested_archive_path"],
        "docs/clean/archive/clean-YYYY-MM/scan.json"
    );
}

#[test]
fn test_reports_are_byte_for_byte_idempotent_for_a_fixed_now() {
    let tmp = tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("debug")).unwrap();
    std::fs::create_dir_all(tmp.path().join("docs/dev")).unwrap();
    std::fs::write(tmp.path().join("debug/a.log"), "x").unwrap();
    std::fs::write(tmp.path().join("docs/dev/b.json"), "{}").unwrap();

    let now = SystemTime::now() + days(40);
    let stale = || serde_json::to_string(&stale_files::validate_at(tmp.path(), 30, now)).unwrap();
    let retention =
        || serde_json::to_string(&report_retention::validate_at(tmp.path(), 30, now)).unwrap();
    assert_eq!(stale(), stale());
    assert_eq!(retention(), retention());
}

#[test]
fn test_missing_governed_dirs_are_structural_passes() {
    let tmp = tempdir().unwrap();
    assert_eq!(
        stale_files::validate_at(tmp.path(), 30, SystemTime::now()).status,
        VerdictStatus::Pass
    );
    assert_eq!(
        report_retention::validate_at(tmp.path(), 30, SystemTime::now()).status,
        VerdictStatus::Pass
    );
}
