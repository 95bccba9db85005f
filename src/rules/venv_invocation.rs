//! Interpreter-invocation hygiene across documented and scripted commands.
//!
//! Direct `python script.py` invocations bypass the project virtual
//! environment. Any textual interpreter invocation must be preceded on the
//! same logical line by the activation idiom; an activation on the
//! previous line that continues with `&&` or `\` also counts, since
//! multi-line activation is common in practice.

use crate::core::report::{Severity, VerdictReport, Violation};
use crate::core::scan;
use regex::Regex;
use serde_json::json;
use std::path::Path;
use std::sync::LazyLock;

pub const VALIDATOR_ID: &str = "venv-invocation";
pub const EDGE_CASE: &str = "EC002";

const EXTENSIONS: [&str; 3] = ["md", "json", "sh"];

static INVOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(python3?)\s+([~/.]\S+\.py)").expect("static regex"));

static ACTIVATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)source\s+\S*venv/bin/activate").expect("static regex"));

static ACTIVATION_AND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)source\s+\S*venv/bin/activate\s*&&").expect("static regex"));

struct Invocation<'a> {
    interpreter: &'a str,
    script: &'a str,
    matched: &'a str,
    start: usize,
}

fn find_invocation(line: &str) -> Option<Invocation<'_>> {
    let caps = INVOCATION.captures(line)?;
    let whole = caps.get(0)?;
    Some(Invocation {
        interpreter: caps.get(1)?.as_str(),
        script: caps.get(2)?.as_str(),
        matched: whole.as_str(),
        start: whole.start(),
    })
}

/// Activation on the same logical line, before the invocation.
fn has_activation_prefix(line: &str, invocation_start: usize) -> bool {
    ACTIVATION_AND.is_match(&line[..invocation_start])
}

/// Activation on the previous non-blank line that visibly continues into
/// this one (`&&` or a trailing backslash).
fn continues_activation(previous: Option<&str>) -> bool {
    let Some(prev) = previous else {
        return false;
    };
    let trimmed = prev.trim_end();
    ACTIVATION.is_match(trimmed) && (trimmed.ends_with("&&") || trimmed.ends_with('\\'))
}

pub fn validate(project_root: &Path) -> VerdictReport {
    let mut violations = Vec::new();
    let mut files_checked = 0usize;

    for file_path in scan::collect_with_extensions(project_root, &EXTENSIONS) {
        files_checked += 1;
        let Ok(content) = std::fs::read_to_string(&file_path) else {
            continue;
        };
        let is_shell = file_path.extension().and_then(|e| e.to_str()) == Some("sh");

        let mut previous_nonblank: Option<&str> = None;
        for (line_num, line) in content.lines().enumerate() {
            if is_shell && line.trim_start().starts_with('#') {
                continue;
            }

            if let Some(invocation) = find_invocation(line) {
                let compliant = has_activation_prefix(line, invocation.start)
                    || continues_activation(previous_nonblank);
                if !compliant {
                    violations.push(
                        Violation::new(
                            scan::rel_display(project_root, &file_path),
                            Severity::Critical,
                            "Python invocation without venv activation",
                        )
                        .with_line(line_num as u32 + 1)
                        .with_extra("pattern", json!(invocation.matched))
                        .with_extra(
                            "expected",
                            json!(format!(
                                "source venv/bin/activate && {} {}",
                                invocation.interpreter, invocation.script
                            )),
                        )
                        .with_extra("context", json!(line.trim())),
                    );
                }
            }

            if !line.trim().is_empty() {
                previous_nonblank = Some(line);
            }
        }
    }

    let summary = json!({
        "total_files_checked": files_checked,
        "violations_found": violations.len(),
    });
    let recommendations = vec![
        "Update Python invocations to use: source venv/bin/activate && python3 script.py"
            .to_string(),
        "See agents/dev.md Section 4 for proper venv usage patterns".to_string(),
    ];

    VerdictReport::new(VALIDATOR_ID, EDGE_CASE, violations, summary, recommendations)
}
