//! Process-wide configuration, read once per invocation.
//!
//! Two snapshots live here: `ProjectEnv` captures the environment-supplied
//! roots the hook resolves scripts against, and `Settings` carries the
//! tunable retention policy shared by the age-based rules. Neither is
//! mutated after construction.

use crate::core::error::SticklerError;
use std::path::{Path, PathBuf};

/// Environment variable naming the project root the hook should prefer
/// over the process working directory.
pub const PROJECT_DIR_ENV: &str = "STICKLER_PROJECT_DIR";

/// Optional per-project config file at the scanned root.
pub const CONFIG_FILE: &str = "stickler.toml";

/// Snapshot of environment-supplied locations, taken at the start of one
/// invocation. There is no cross-invocation lifecycle to manage.
#[derive(Debug, Clone)]
pub struct ProjectEnv {
    pub project_dir: Option<PathBuf>,
    pub cwd: PathBuf,
    pub home: Option<PathBuf>,
}

impl ProjectEnv {
    pub fn from_process() -> Result<Self, SticklerError> {
        Ok(ProjectEnv {
            project_dir: std::env::var_os(PROJECT_DIR_ENV).map(PathBuf::from),
            cwd: std::env::current_dir()?,
            home: std::env::var_os("HOME").map(PathBuf::from),
        })
    }

    /// Root the sandbox inspects for a virtual-environment marker: the
    /// env-supplied project root when present, the working directory
    /// otherwise.
    pub fn sandbox_root(&self) -> &Path {
        self.project_dir.as_deref().unwrap_or(&self.cwd)
    }
}

/// Tunable rule settings. `max_age_days` governs both the stale-file and
/// report-retention rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub max_age_days: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { max_age_days: 30 }
    }
}

impl Settings {
    /// Load settings for a project root: `stickler.toml` `[retention]`
    /// overrides the default, an explicit CLI value overrides both.
    pub fn load(project_root: &Path, cli_max_age_days: Option<u64>) -> Self {
        let mut settings = Settings::default();
        if let Some(days) = file_max_age_days(project_root) {
            settings.max_age_days = days;
        }
        if let Some(days) = cli_max_age_days {
            settings.max_age_days = days;
        }
        settings
    }
}

fn file_max_age_days(project_root: &Path) -> Option<u64> {
    let config_path = project_root.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path).ok()?;
    let table = content.parse::<toml::Table>().ok()?;
    table
        .get("retention")?
        .as_table()?
        .get("max_age_days")?
        .as_integer()
        .and_then(|n| u64::try_from(n).ok())
}
