//! Stickler: the authorship-policy gate for agent workflow repositories.
//!
//! Stickler enforces house rules on a repository of workflow definitions
//! and their supporting automation scripts. It does two independent jobs
//! that share one artifact corpus:
//!
//! - **Checklist injection**: before a multi-step workflow command runs,
//!   the pre-command hook resolves a project-owned checklist generator,
//!   executes it under a bounded sandbox, and forces the checklist into
//!   the assistant's working context. The hook never blocks a command; a
//!   broken helper script degrades to a pass-through with a diagnostic.
//! - **Static validation**: a closed catalogue of independent rules
//!   inspects command documents, agent definitions, reports, and scripts,
//!   each emitting one machine-consumable verdict report. Any violation
//!   maps to a non-zero exit, so the suite doubles as an automation gate.
//!
//! # Examples
//!
//! ```bash
//! # Run the whole rule catalogue against a project
//! stickler check all --project-root . --format text
//!
//! # Run one rule as a CI gate
//! stickler check step-numbering --project-root .
//!
//! # List the catalogue
//! stickler rules
//!
//! # Hook boundary (request on stdin, decision on stdout)
//! echo '{"command": "/dev implement parser"}' | stickler hook inject
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: shared primitives (error type, verdict-report contract,
//!   filesystem scanning, configuration, output rendering)
//! - [`hook`]: checklist resolver, sandbox, and injection decision
//! - [`rules`]: the validator suite and its composition point

pub mod core;
pub mod hook;
pub mod rules;

use crate::core::error::SticklerError;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    name = "stickler",
    version = env!("CARGO_PKG_VERSION"),
    about = "Authorship-policy gate for agent workflow repositories"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run policy rules against a project tree
    Check(rules::CheckCli),
    /// List the rule catalogue
    Rules(rules::RulesCli),
    /// Pre-command hook surfaces
    Hook(HookGroupCli),
    /// Print version
    Version,
}

#[derive(clap::Args, Debug)]
struct HookGroupCli {
    #[clap(subcommand)]
    command: HookCommand,
}

#[derive(Subcommand, Debug)]
enum HookCommand {
    /// Read a hook request from stdin and write one decision to stdout
    Inject,
}

pub fn run() -> Result<(), SticklerError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Check(check) => rules::run_check_cli(check),
        Command::Rules(rules_cli) => rules::run_rules_cli(rules_cli),
        Command::Hook(group) => match group.command {
            HookCommand::Inject => {
                // The hook boundary never signals failure via exit status.
                hook::run_hook_cli();
                Ok(())
            }
        },
    }
}
