use std::path::PathBuf;
use std::time::Duration;
use stickler::core::config::ProjectEnv;
use stickler::hook::inject::{HookRequest, decide, decide_with_timeout};
use tempfile::{TempDir, tempdir};

fn project_env(project: &TempDir) -> ProjectEnv {
    ProjectEnv {
        project_dir: Some(project.path().to_path_buf()),
        cwd: PathBuf::from("/nonexistent-cwd"),
        home: None,
    }
}

fn request(command: &str) -> HookRequest {
    serde_json::from_value(serde_json::json!({"command": command})).unwrap()
}

fn write_script(project: &TempDir, command_id: &str) {
    let dir = project.path().join("scripts/todo");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{}.py", command_id)), "").unwrap();
}

// Shadowing `python` with a shell function inside the activation file
// exercises the venv-activated branch without requiring an interpreter.
fn stub_interpreter(project: &TempDir, body: &str) {
    let venv_dir = project.path().join("venv/bin");
    std::fs::create_dir_all(&venv_dir).unwrap();
    std::fs::write(
        venv_dir.join("activate"),
        format!("python() {{ {} ; }}\n", body),
    )
    .unwrap();
}

#[test]
fn test_free_text_passes_through() {
    let project = tempdir().unwrap();
    let decision = decide(&project_env(&project), &request("just some prose"));
    assert_eq!(decision.status, "allow");
    assert!(decision.forced_context().is_none());
    assert!(decision.message.is_none());
}

#[test]
fn test_command_without_script_passes_through() {
    let project = tempdir().unwrap();
    let decision = decide(&project_env(&project), &request("/ghost run"));
    assert_eq!(decision.status, "allow");
    assert!(decision.forced_context().is_none());
    assert!(decision.message.is_none());
}

#[test]
fn test_resolved_script_forces_context() {
    let project = tempdir().unwrap();
    write_script(&project, "dev");
    stub_interpreter(&project, "echo '[{\"content\": \"Step 1: Parse\"}]'");

    let decision = decide(&project_env(&project), &request("/dev implement parser"));
    assert_eq!(decision.status, "allow");
    let context = decision.forced_context().expect("forced context");
    assert!(context.contains("Command: /dev"));
    assert!(context.contains("Step 1: Parse"));
    assert!(context.contains("MANDATORY WORKFLOW CHECKLIST"));
    assert!(decision.message.is_none());
}

#[test]
fn test_namespaced_command_resolves_outer_segment() {
    let project = tempdir().unwrap();
    write_script(&project, "dev");
    stub_interpreter(&project, "echo '[]'");

    let decision = decide(&project_env(&project), &request("/dev:implement feature"));
    let context = decision.forced_context().expect("forced context");
    assert!(context.contains("Command: /dev"));
}

#[test]
fn test_failing_script_degrades_to_advisory_message() {
    let project = tempdir().unwrap();
    write_script(&project, "dev");
    stub_interpreter(&project, "echo broken >&2; return 1");

    let decision = decide(&project_env(&project), &request("/dev go"));
    assert_eq!(decision.status, "allow");
    assert!(decision.forced_context().is_none());
    let message = decision.message.expect("advisory message");
    assert!(message.starts_with("# warning:"));
    assert!(message.contains("broken"));
}

#[test]
fn test_timeout_is_distinct_and_still_allows() {
    let project = tempdir().unwrap();
    write_script(&project, "dev");
    stub_interpreter(&project, "sleep 10");

    let decision = decide_with_timeout(
        &project_env(&project),
        &request("/dev go"),
        Duration::from_millis(300),
    );
    assert_eq!(decision.status, "allow");
    assert!(decision.forced_context().is_none());
    let message = decision.message.expect("timeout diagnostic");
    assert!(message.contains("timeout"));
}

#[test]
fn test_empty_script_output_passes_through() {
    let project = tempdir().unwrap();
    write_script(&project, "dev");
    stub_interpreter(&project, "true");

    let decision = decide(&project_env(&project), &request("/dev go"));
    assert_eq!(decision.status, "allow");
    assert!(decision.forced_context().is_none());
    assert!(decision.message.is_none());
}

#[test]
fn test_decision_serializes_to_hook_wire_shape() {
    let project = tempdir().unwrap();
    write_script(&project, "dev");
    stub_interpreter(&project, "echo '[{\"content\": \"Step 1\"}]'");

    let decision = decide(&project_env(&project), &request("/dev go"));
    let value = serde_json::to_value(&decision).unwrap();
    assert_eq!(value["status"], "allow");
    assert!(
        value["hookSpecificOutput"]["additionalContext"]
            .as_str()
            .unwrap()
            .contains("Step 1")
    );
}
