//! Checklist resolver and injector for the pre-command hook boundary.
//!
//! Given an intercepted command invocation, this subsystem derives the
//! command identifier, locates a matching checklist generator through an
//! ordered search path, executes it under a bounded sandbox, and produces
//! either a pass-through decision or a forced-context injection payload.
//!
//! Every failure mode in here degrades to an `allow` decision. A broken
//! checklist helper must never block the workflow it was meant to assist.

pub mod command;
pub mod inject;
pub mod resolve;
pub mod sandbox;

pub use inject::{HookDecision, HookRequest, decide, run_hook_cli};
