use std::path::Path;
use stickler::core::report::{Severity, VerdictStatus};
use stickler::rules::file_naming;
use tempfile::tempdir;

fn write_doc(root: &Path, relative: &str) {
    let path = root.join("docs").join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "# doc\n").unwrap();
}

#[test]
fn test_uppercase_name_is_flagged_with_suggestion() {
    let tmp = tempdir().unwrap();
    write_doc(tmp.path(), "My_Report.md");

    let report = file_naming::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Fail);
    assert_eq!(report.violations.len(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.severity, Severity::Minor);
    // Uppercase takes precedence over the underscore.
    assert_eq!(violation.extra["issue"], "UPPERCASE or CamelCase");
    assert_eq!(violation.extra["suggested_name"], "my-report.md");
    assert_eq!(violation.extra["current_name"], "My_Report.md");
}

#[test]
fn test_snake_case_classification() {
    let tmp = tempdir().unwrap();
    write_doc(tmp.path(), "weekly_report.md");

    let report = file_naming::validate(tmp.path());
    assert_eq!(report.violations[0].extra["issue"], "snake_case");
    assert_eq!(
        report.violations[0].extra["suggested_name"],
        "weekly-report.md"
    );
}

#[test]
fn test_kebab_case_passes() {
    let tmp = tempdir().unwrap();
    write_doc(tmp.path(), "weekly-report.md");
    write_doc(tmp.path(), "guides/setup-notes.md");

    let report = file_naming::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Pass);
    assert_eq!(report.summary["total_files_checked"], 2);
}

#[test]
fn test_special_files_pass_unconditionally() {
    let tmp = tempdir().unwrap();
    write_doc(tmp.path(), "README.md");
    write_doc(tmp.path(), "INDEX.md");
    write_doc(tmp.path(), "ARCHITECTURE.md");

    let report = file_naming::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Pass);
}

#[test]
fn test_archived_docs_are_exempt() {
    let tmp = tempdir().unwrap();
    write_doc(tmp.path(), "archive/Old_Mess.md");

    let report = file_naming::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Pass);
    assert_eq!(report.summary["total_files_checked"], 0);
}

#[test]
fn test_missing_docs_dir_is_a_structural_pass() {
    let tmp = tempdir().unwrap();
    let report = file_naming::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Pass);
    assert_eq!(report.summary["total_files_checked"], 0);
}

#[test]
fn test_non_markdown_files_are_ignored() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("docs/Weird_Name.TXT");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "x").unwrap();

    let report = file_naming::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Pass);
}
