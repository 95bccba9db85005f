//! Verdict-report data contract shared by every rule.
//!
//! A `VerdictReport` is created fresh per validation run and never mutated
//! after return. The `status == fail iff violations is non-empty`
//! biconditional is enforced by construction: `VerdictReport::new` is the
//! only constructor, it derives `status` from the violation list, and it
//! drops recommendations when there is nothing to remediate.

use crate::core::output;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Medium,
    Major,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Pass,
    Fail,
}

/// One detected policy breach. Immutable once emitted; `extra` carries
/// rule-specific structured fields (`missing_item`, `suggested_name`,
/// `age_days`, ...) flattened into the serialized object.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub severity: Severity,
    pub reason: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl Violation {
    pub fn new(file: impl Into<String>, severity: Severity, reason: impl Into<String>) -> Self {
        Violation {
            file: file.into(),
            line: None,
            severity,
            reason: reason.into(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Aggregate result of one validator run.
#[derive(Debug, Clone, Serialize)]
pub struct VerdictReport {
    pub validator: String,
    pub edge_case: String,
    pub status: VerdictStatus,
    pub violations: Vec<Violation>,
    pub summary: JsonValue,
    pub recommendations: Vec<String>,
}

impl VerdictReport {
    /// Sole constructor. Status is derived from the violation list and
    /// recommendations are kept only when violations exist.
    pub fn new(
        validator: &str,
        edge_case: &str,
        violations: Vec<Violation>,
        summary: JsonValue,
        recommendations: Vec<String>,
    ) -> Self {
        let status = if violations.is_empty() {
            VerdictStatus::Pass
        } else {
            VerdictStatus::Fail
        };
        let recommendations = if violations.is_empty() {
            Vec::new()
        } else {
            recommendations
        };
        VerdictReport {
            validator: validator.to_string(),
            edge_case: edge_case.to_string(),
            status,
            violations,
            summary,
            recommendations,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == VerdictStatus::Pass
    }
}

/// Human-facing one-report rendering for the text format.
pub fn render_text(report: &VerdictReport) -> String {
    let mut lines = Vec::new();
    let verdict = match report.status {
        VerdictStatus::Pass => "PASS".green().bold().to_string(),
        VerdictStatus::Fail => "FAIL".red().bold().to_string(),
    };
    lines.push(format!(
        "  [{}] {} ({}): {} violation(s)",
        verdict,
        report.validator,
        report.edge_case,
        report.violations.len()
    ));
    for violation in &report.violations {
        let location = match violation.line {
            Some(line) => format!("{}:{}", violation.file, line),
            None => violation.file.clone(),
        };
        lines.push(format!(
            "         {} {}: {}",
            severity_tag(violation.severity),
            location,
            output::compact_line(&violation.reason, 96)
        ));
    }
    if !report.recommendations.is_empty() {
        lines.push(format!(
            "         {} {}",
            "fix:".cyan(),
            output::preview_messages(&report.recommendations, 2, 80)
        ));
    }
    lines.join("\n")
}

fn severity_tag(severity: Severity) -> String {
    match severity {
        Severity::Minor => "minor".normal().to_string(),
        Severity::Medium => "medium".yellow().to_string(),
        Severity::Major => "major".yellow().bold().to_string(),
        Severity::Critical => "critical".red().bold().to_string(),
    }
}
