//! Decision assembly and the stdin/stdout hook boundary.
//!
//! The hook reads one structured request from stdin and writes exactly one
//! decision object to stdout. The decision is always `allow` — this hook
//! augments context, it never blocks execution — and the exit status is
//! not used to signal failure.

use crate::core::config::ProjectEnv;
use crate::core::error::SticklerError;
use crate::hook::command::extract_command_id;
use crate::hook::resolve::resolve_script;
use crate::hook::sandbox::{self, SCRIPT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Prefix marking sandbox output as a diagnostic rather than a checklist.
pub const DIAGNOSTIC_PREFIX: &str = "# warning:";

const BANNER_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Structured request read from the host process.
#[derive(Debug, Clone, Deserialize)]
pub struct HookRequest {
    #[serde(default)]
    pub command: String,
}

/// Wire-shaped decision: `{status, hookSpecificOutput?, message?}`.
#[derive(Debug, Clone, Serialize)]
pub struct HookDecision {
    pub status: &'static str,
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HookSpecificOutput {
    #[serde(rename = "additionalContext")]
    pub additional_context: String,
}

impl HookDecision {
    pub fn allow() -> Self {
        HookDecision {
            status: "allow",
            hook_specific_output: None,
            message: None,
        }
    }

    pub fn allow_with_context(context: String) -> Self {
        HookDecision {
            status: "allow",
            hook_specific_output: Some(HookSpecificOutput {
                additional_context: context,
            }),
            message: None,
        }
    }

    pub fn allow_with_message(message: String) -> Self {
        HookDecision {
            status: "allow",
            hook_specific_output: None,
            message: Some(message),
        }
    }

    pub fn forced_context(&self) -> Option<&str> {
        self.hook_specific_output
            .as_ref()
            .map(|out| out.additional_context.as_str())
    }
}

/// Wrap raw checklist output with the mandatory-processing banner. The
/// payload itself is opaque to this component.
pub fn format_injection(checklist_json: &str, command_id: &str) -> String {
    format!(
        "\n{rule}\nMANDATORY WORKFLOW CHECKLIST\n{rule}\n\n\
         Command: /{command_id}\n\n\
         Create this checklist with the todo tool BEFORE executing the workflow:\n\n\
         {checklist_json}\n\n\
         Mark each step in_progress before starting it and completed after.\n\
         Never skip steps.\n\n{rule}\n",
        rule = BANNER_RULE,
    )
}

/// Run a resolved script and fold every failure mode into either checklist
/// output or a diagnostic string. Nothing escapes as an error.
fn run_script(env: &ProjectEnv, script: &Path, timeout: Duration) -> String {
    let plan = sandbox::launch_plan(env.sandbox_root());
    match sandbox::execute(script, &plan, timeout) {
        Ok(result) if result.timed_out => format!(
            "{} checklist script timeout (>{}s)",
            DIAGNOSTIC_PREFIX,
            timeout.as_secs()
        ),
        Ok(result) if result.exit_code == Some(0) => result.stdout.trim().to_string(),
        Ok(result) => format!(
            "{} checklist script failed: {}",
            DIAGNOSTIC_PREFIX,
            result.stderr.trim()
        ),
        Err(err) => format!("{} checklist script error: {}", DIAGNOSTIC_PREFIX, err),
    }
}

/// Orchestrate extraction, resolution, and sandboxed execution into one
/// decision. Always `allow`; forced context only when a script was found
/// and produced non-empty, non-diagnostic output.
pub fn decide(env: &ProjectEnv, request: &HookRequest) -> HookDecision {
    decide_with_timeout(env, request, SCRIPT_TIMEOUT)
}

pub fn decide_with_timeout(
    env: &ProjectEnv,
    request: &HookRequest,
    timeout: Duration,
) -> HookDecision {
    let command_id = extract_command_id(&request.command);
    if command_id.is_empty() {
        return HookDecision::allow();
    }

    let Some(script) = resolve_script(env, &command_id) else {
        return HookDecision::allow();
    };

    let output = run_script(env, &script, timeout);
    if output.is_empty() {
        return HookDecision::allow();
    }
    if output.starts_with(DIAGNOSTIC_PREFIX) {
        return HookDecision::allow_with_message(output);
    }

    HookDecision::allow_with_context(format_injection(&output, &command_id))
}

/// The hook boundary: one request in, exactly one well-formed decision
/// out. Exceptions inside the handler are converted into an `allow` shape
/// with a diagnostic message.
pub fn run_hook_cli() {
    let decision = read_and_decide().unwrap_or_else(|err| {
        HookDecision::allow_with_message(format!("{} hook error: {}", DIAGNOSTIC_PREFIX, err))
    });

    match serde_json::to_string(&decision) {
        Ok(line) => println!("{}", line),
        Err(_) => println!("{{\"status\": \"allow\"}}"),
    }
}

fn read_and_decide() -> Result<HookDecision, SticklerError> {
    let env = ProjectEnv::from_process()?;
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    let request: HookRequest = serde_json::from_str(&raw)
        .map_err(|err| SticklerError::ValidationError(format!("malformed hook request: {err}")))?;
    Ok(decide(&env, &request))
}
