use std::path::Path;
use stickler::core::report::{Severity, VerdictStatus};
use stickler::rules::{optional_steps, step_numbering};
use tempfile::tempdir;

fn write_command(root: &Path, name: &str, content: &str) {
    let dir = root.join("commands");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_decimal_step_produces_exactly_one_violation() {
    let tmp = tempdir().unwrap();
    write_command(
        tmp.path(),
        "clean.md",
        "# Clean\n\n### Step 1: Scan\n\n### Step 2: Archive\n\nStep 2.5: Foo\n",
    );

    let report = step_numbering::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Fail);
    assert_eq!(report.violations.len(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.file, "commands/clean.md");
    assert_eq!(violation.line, Some(7));
    assert_eq!(violation.severity, Severity::Critical);
    assert_eq!(violation.extra["pattern"], "Step 2.5");
    assert_eq!(violation.extra["context"], "Step 2.5: Foo");
}

#[test]
fn test_integer_steps_pass() {
    let tmp = tempdir().unwrap();
    write_command(
        tmp.path(),
        "dev.md",
        "### Step 1: Parse\n### Step 2: Build\n### Step 3: Verify\n",
    );

    let report = step_numbering::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Pass);
    assert!(report.recommendations.is_empty());
}

#[test]
fn test_missing_commands_dir_is_a_structural_pass() {
    let tmp = tempdir().unwrap();
    let report = step_numbering::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Pass);
    assert_eq!(report.summary["total_files_checked"], 0);

    let report = optional_steps::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Pass);
    assert_eq!(report.summary["total_files_checked"], 0);
}

#[test]
fn test_optional_step_without_condition_is_flagged() {
    let tmp = tempdir().unwrap();
    write_command(
        tmp.path(),
        "deploy.md",
        "### Step 1: Build\n\n### Step 2: Smoke Test (Optional)\n\nRun it when you feel like it.\n",
    );

    let report = optional_steps::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Fail);
    assert_eq!(report.violations.len(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.line, Some(3));
    assert_eq!(violation.severity, Severity::Critical);
    assert_eq!(violation.extra["context"], "### Step 2: Smoke Test (Optional)");
}

#[test]
fn test_optional_step_with_positive_condition_passes() {
    let tmp = tempdir().unwrap();
    write_command(
        tmp.path(),
        "deploy.md",
        "### Step 1: Build\n\n### Step 2: Smoke Test (Optional)\n\n\
         MUST execute if the target is production.\n",
    );

    let report = optional_steps::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Pass);
}

#[test]
fn test_condition_outside_lookahead_window_does_not_count() {
    let tmp = tempdir().unwrap();
    let filler = "filler line\n".repeat(120);
    write_command(
        tmp.path(),
        "deploy.md",
        &format!(
            "### Step 2: Smoke Test (Optional)\n\n{}\nMUST execute if deploying.\n",
            filler
        ),
    );

    let report = optional_steps::validate(tmp.path());
    assert_eq!(report.status, VerdictStatus::Fail);
}
