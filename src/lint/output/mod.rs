//! Check report formatters.
//!
//! This module provides formatters for writing check reports in different
//! formats (human-readable, JSON, SARIF).

pub mod human;
pub mod json;
pub mod sarif;

use crate::lint::checker::{CheckReport, CheckStats};
use crate::lint::Severity;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format for check results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Sarif,
}

/// Trait for formatting check output.
pub trait LintFormatter {
    /// Format reports to the given writer.
    fn format<W: Write>(&self, reports: &[CheckReport], writer: &mut W) -> std::io::Result<()>;
}

/// Diagnostic counts across a set of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
    pub minor_warnings: usize,
    pub infos: usize,
    #[serde(flatten)]
    pub stats: CheckStats,
}

impl Summary {
    /// Count every diagnostic in `reports`.
    pub fn of(reports: &[CheckReport]) -> Self {
        let mut summary = Self {
            files: reports.len(),
            ..Default::default()
        };
        for report in reports {
            summary.stats += report.stats;
            for diagnostic in &report.diagnostics {
                match diagnostic.severity {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                    Severity::MinorWarning => summary.minor_warnings += 1,
                    Severity::Info => summary.infos += 1,
                }
            }
        }
        summary
    }

    /// Total number of actionable diagnostics.
    pub fn problems(&self) -> usize {
        self.errors + self.warnings + self.minor_warnings
    }
}

/// Write reports in the chosen format.
pub fn write_reports<W: Write>(
    format: OutputFormat,
    reports: &[CheckReport],
    use_color: bool,
    writer: &mut W,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => HumanFormatter::new(use_color).format(reports, writer),
        OutputFormat::Json => JsonFormatter::new().format(reports, writer),
        OutputFormat::Sarif => {
            SarifFormatter::new("scriptcheck", env!("CARGO_PKG_VERSION")).format(reports, writer)
        }
    }
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use sarif::SarifFormatter;
