//! Ordered search-path resolution for checklist generator scripts.

use crate::core::config::ProjectEnv;
use std::path::PathBuf;

/// Conventional script location relative to a root.
const SCRIPT_SUBDIR: &str = "scripts/todo";

/// Dot-prefixed variant of the conventional location.
const DOT_SCRIPT_SUBDIR: &str = ".stickler/scripts/todo";

fn script_name(command_id: &str) -> String {
    format!("{}.py", command_id)
}

/// Candidate locations in resolution order. Order is significant:
/// env-supplied project root first, then the working directory, then the
/// home fallback; within each root the plain convention path precedes the
/// dot-prefixed one, except the home fallback which is dot-only.
pub fn search_paths(env: &ProjectEnv, command_id: &str) -> Vec<PathBuf> {
    let name = script_name(command_id);
    let mut candidates = Vec::new();

    if let Some(project) = &env.project_dir {
        candidates.push(project.join(SCRIPT_SUBDIR).join(&name));
        candidates.push(project.join(DOT_SCRIPT_SUBDIR).join(&name));
    }
    candidates.push(env.cwd.join(SCRIPT_SUBDIR).join(&name));
    candidates.push(env.cwd.join(DOT_SCRIPT_SUBDIR).join(&name));
    if let Some(home) = &env.home {
        candidates.push(home.join(DOT_SCRIPT_SUBDIR).join(&name));
    }
    candidates
}

/// First existing regular file in the search path, if any. A directory
/// entry at a candidate location never matches.
pub fn resolve_script(env: &ProjectEnv, command_id: &str) -> Option<PathBuf> {
    if command_id.is_empty() {
        return None;
    }
    search_paths(env, command_id)
        .into_iter()
        .find(|candidate| candidate.is_file())
}
