//! Bounded-sandbox execution of checklist generator scripts.
//!
//! The launch strategy is a pure predicate over the resolved project root,
//! so the direct-interpreter vs wrapped-with-activation decision is
//! inspectable without spawning a process. Execution itself is the only
//! operation in the system allowed to block, and it is clamped by a hard
//! wall-clock timeout with no retry.

use crate::core::error::SticklerError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Hard wall-clock ceiling for one checklist script run.
pub const SCRIPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Marker whose presence under the project root switches execution to the
/// activation-wrapped branch.
const VENV_ACTIVATE: &str = "venv/bin/activate";

/// How a resolved script will be invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    /// `python3 <script>` via the standard interpreter.
    Direct,
    /// `bash -c "source <activate> && python <script>"`.
    VenvActivated(PathBuf),
}

/// Outcome of one sandboxed invocation. Never persisted.
#[derive(Debug, Clone)]
pub struct SandboxExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

/// Select the execution branch for `project_root` without spawning
/// anything.
pub fn launch_plan(project_root: &Path) -> LaunchPlan {
    let activate = project_root.join(VENV_ACTIVATE);
    if activate.is_file() {
        LaunchPlan::VenvActivated(activate)
    } else {
        LaunchPlan::Direct
    }
}

/// Run `script` under `plan` with a hard timeout. A timeout terminates the
/// subprocess and reports a distinct `timed_out` outcome so callers can
/// tell a slow policy script from a broken one. Spawn-level failures
/// surface as `Err` for the caller to degrade.
pub fn execute(
    script: &Path,
    plan: &LaunchPlan,
    timeout: Duration,
) -> Result<SandboxExecutionResult, SticklerError> {
    let mut command = match plan {
        LaunchPlan::Direct => {
            let mut cmd = Command::new("python3");
            cmd.arg(script);
            cmd
        }
        LaunchPlan::VenvActivated(activate) => {
            let mut cmd = Command::new("bash");
            cmd.arg("-c").arg(format!(
                "source {} && python {}",
                activate.display(),
                script.display()
            ));
            cmd
        }
    };

    let start = Instant::now();
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(SticklerError::IoError)?;

    loop {
        if child
            .try_wait()
            .map_err(SticklerError::IoError)?
            .is_some()
        {
            let output = child.wait_with_output().map_err(SticklerError::IoError)?;
            return Ok(SandboxExecutionResult {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code(),
                timed_out: false,
            });
        }
        if start.elapsed() > timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(SandboxExecutionResult {
                stdout: String::new(),
                stderr: String::new(),
                exit_code: None,
                timed_out: true,
            });
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
