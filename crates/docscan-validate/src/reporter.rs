//! Audit Report Rendering
//!
//! Renders an [`AuditReport`] in two formats:
//! - Human-readable: one line per diagnostic (check) or applied change (fix)
//! - JSON for CI integration

use crate::auditor::{AuditMode, AuditReport};

pub struct Reporter;

impl Reporter {
    /// Generate JSON report
    pub fn to_json(report: &AuditReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Generate the stdout lines of a run, each terminated by a newline
    pub fn to_human_readable(report: &AuditReport) -> String {
        let mut output = String::new();
        match report.mode {
            AuditMode::Check => {
                for diagnostic in &report.diagnostics {
                    output.push_str(&format!("{diagnostic}\n"));
                }
            }
            AuditMode::Fix => {
                for change in &report.changes {
                    output.push_str(&format!("{change}\n"));
                }
            }
        }
        output
    }

    /// Error lines for failed rewrites, meant for stderr
    pub fn write_failure_lines(report: &AuditReport) -> Vec<String> {
        report
            .write_failures
            .iter()
            .map(|f| format!("error: failed to write {}: {}", f.path.display(), f.reason))
            .collect()
    }
}
