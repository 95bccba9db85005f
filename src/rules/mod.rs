//! Validator suite: a closed catalogue of authorship-policy rules.
//!
//! Every rule honors one contract: `validate(project_root) -> VerdictReport`,
//! a pure function of the on-disk tree — read-only, never aborting on a
//! per-file error, reporting paths relative to the root, and excluding
//! archive subtrees. Rules are registered explicitly in [`CATALOGUE`], the
//! single composition point; there is no discovery magic.
//!
//! The suite driver may run rules in parallel; correctness never depends
//! on ordering, and merged output is always presented in catalogue order.

pub mod checklist_completeness;
pub mod checklist_parity;
pub mod file_naming;
pub mod optional_steps;
pub mod protected_files;
pub mod report_retention;
pub mod script_charset;
pub mod stale_files;
pub mod step_numbering;
pub mod venv_invocation;

use crate::core::config::Settings;
use crate::core::error::SticklerError;
use crate::core::report::{self, VerdictReport};
use clap::Parser;
use colored::Colorize;
use rayon::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    ChecklistCompleteness,
    ProtectedFiles,
    StaleFileAge,
    FileNaming,
    OptionalStepConditions,
    StepNumbering,
    ChecklistParity,
    VenvInvocation,
    ScriptCharset,
    ReportRetention,
}

/// The full rule set, in presentation order.
pub const CATALOGUE: [Rule; 10] = [
    Rule::ChecklistCompleteness,
    Rule::ProtectedFiles,
    Rule::StaleFileAge,
    Rule::FileNaming,
    Rule::OptionalStepConditions,
    Rule::StepNumbering,
    Rule::ChecklistParity,
    Rule::VenvInvocation,
    Rule::ScriptCharset,
    Rule::ReportRetention,
];

impl Rule {
    pub const fn id(self) -> &'static str {
        match self {
            Rule::ChecklistCompleteness => checklist_completeness::VALIDATOR_ID,
            Rule::ProtectedFiles => protected_files::VALIDATOR_ID,
            Rule::StaleFileAge => stale_files::VALIDATOR_ID,
            Rule::FileNaming => file_naming::VALIDATOR_ID,
            Rule::OptionalStepConditions => optional_steps::VALIDATOR_ID,
            Rule::StepNumbering => step_numbering::VALIDATOR_ID,
            Rule::ChecklistParity => checklist_parity::VALIDATOR_ID,
            Rule::VenvInvocation => venv_invocation::VALIDATOR_ID,
            Rule::ScriptCharset => script_charset::VALIDATOR_ID,
            Rule::ReportRetention => report_retention::VALIDATOR_ID,
        }
    }

    /// Stable identifier correlating the rule to the historical incident
    /// it was written to prevent.
    pub const fn edge_case(self) -> &'static str {
        match self {
            Rule::ChecklistCompleteness => checklist_completeness::EDGE_CASE,
            Rule::ProtectedFiles => protected_files::EDGE_CASE,
            Rule::StaleFileAge => stale_files::EDGE_CASE,
            Rule::FileNaming => file_naming::EDGE_CASE,
            Rule::OptionalStepConditions => optional_steps::EDGE_CASE,
            Rule::StepNumbering => step_numbering::EDGE_CASE,
            Rule::ChecklistParity => checklist_parity::EDGE_CASE,
            Rule::VenvInvocation => venv_invocation::EDGE_CASE,
            Rule::ScriptCharset => script_charset::EDGE_CASE,
            Rule::ReportRetention => report_retention::EDGE_CASE,
        }
    }

    pub const fn subject(self) -> &'static str {
        match self {
            Rule::ChecklistCompleteness => "Quality Checklist covers all required items",
            Rule::ProtectedFiles => "official files protected from relocation",
            Rule::StaleFileAge => "no stale files in debug/",
            Rule::FileNaming => "docs/ Markdown files use kebab-case",
            Rule::OptionalStepConditions => "(Optional) steps state execution conditions",
            Rule::StepNumbering => "no decimal step numbering in commands",
            Rule::ChecklistParity => "multi-step commands ship matching todo scripts",
            Rule::VenvInvocation => "python invocations activate the venv",
            Rule::ScriptCharset => "functional files are English-only",
            Rule::ReportRetention => "workflow reports archived on schedule",
        }
    }

    pub fn from_id(id: &str) -> Option<Rule> {
        CATALOGUE.into_iter().find(|rule| rule.id() == id)
    }

    pub fn validate(self, project_root: &Path, settings: &Settings) -> VerdictReport {
        match self {
            Rule::ChecklistCompleteness => checklist_completeness::validate(project_root),
            Rule::ProtectedFiles => protected_files::validate(project_root),
            Rule::StaleFileAge => stale_files::validate(project_root, settings.max_age_days),
            Rule::FileNaming => file_naming::validate(project_root),
            Rule::OptionalStepConditions => optional_steps::validate(project_root),
            Rule::StepNumbering => step_numbering::validate(project_root),
            Rule::ChecklistParity => checklist_parity::validate(project_root),
            Rule::VenvInvocation => venv_invocation::validate(project_root),
            Rule::ScriptCharset => script_charset::validate(project_root),
            Rule::ReportRetention => {
                report_retention::validate(project_root, settings.max_age_days)
            }
        }
    }
}

/// Run the whole catalogue. Rules are independent and read-only, so the
/// map is parallel; results are collected back into catalogue order.
pub fn validate_all(project_root: &Path, settings: &Settings) -> Vec<VerdictReport> {
    CATALOGUE
        .par_iter()
        .map(|rule| rule.validate(project_root, settings))
        .collect()
}

#[derive(Parser, Debug)]
pub struct CheckCli {
    /// Rule id to run, or 'all' for the whole catalogue.
    #[clap(default_value = "all")]
    pub rule: String,
    /// Project root directory to scan.
    #[clap(long)]
    pub project_root: PathBuf,
    /// Maximum artifact age in days for the retention rules.
    #[clap(long)]
    pub max_age_days: Option<u64>,
    /// Output format: 'json' or 'text'.
    #[clap(long, default_value = "json")]
    pub format: String,
}

#[derive(Parser, Debug)]
pub struct RulesCli {
    /// Output format: 'json' or 'text'.
    #[clap(long, default_value = "text")]
    pub format: String,
}

pub fn run_check_cli(cli: CheckCli) -> Result<(), SticklerError> {
    if !cli.project_root.exists() {
        eprintln!("{}", json!({"error": "Project root does not exist"}));
        return Err(SticklerError::NotFound(format!(
            "project root {}",
            cli.project_root.display()
        )));
    }

    let settings = Settings::load(&cli.project_root, cli.max_age_days);

    let reports = if cli.rule == "all" {
        validate_all(&cli.project_root, &settings)
    } else {
        let rule = Rule::from_id(&cli.rule).ok_or_else(|| {
            SticklerError::ValidationError(format!(
                "unknown rule '{}' (see `stickler rules`)",
                cli.rule
            ))
        })?;
        vec![rule.validate(&cli.project_root, &settings)]
    };

    if cli.format == "json" {
        let rendered = if reports.len() == 1 {
            serde_json::to_string_pretty(&reports[0])
        } else {
            serde_json::to_string_pretty(&reports)
        }
        .map_err(|e| SticklerError::ValidationError(e.to_string()))?;
        println!("{}", rendered);
    } else {
        println!("Stickler Check — Authorship Policy\n");
        for rule_report in &reports {
            println!("{}", report::render_text(rule_report));
        }
        let passed = reports.iter().filter(|r| r.passed()).count();
        let failed = reports.len() - passed;
        println!(
            "\nSummary: {} passed, {} failed",
            passed.to_string().green(),
            if failed > 0 {
                failed.to_string().red().to_string()
            } else {
                failed.to_string()
            }
        );
    }

    let failed = reports.iter().filter(|r| !r.passed()).count();
    if failed > 0 {
        return Err(SticklerError::ValidationError(format!(
            "{} rule(s) failed",
            failed
        )));
    }
    Ok(())
}

pub fn run_rules_cli(cli: RulesCli) -> Result<(), SticklerError> {
    if cli.format == "json" {
        let entries: Vec<_> = CATALOGUE
            .into_iter()
            .map(|rule| {
                json!({
                    "id": rule.id(),
                    "edge_case": rule.edge_case(),
                    "subject": rule.subject(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries)
                .map_err(|e| SticklerError::ValidationError(e.to_string()))?
        );
    } else {
        println!("Stickler Rule Catalogue\n");
        for rule in CATALOGUE {
            println!(
                "  {:<26} {:<8} {}",
                rule.id().bold(),
                rule.edge_case(),
                rule.subject()
            );
        }
    }
    Ok(())
}
