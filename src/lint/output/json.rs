//! JSON output formatter.
//!
//! Formats check reports as machine-readable JSON for tooling integration.

use super::{LintFormatter, Summary};
use crate::lint::checker::CheckReport;
use serde::Serialize;
use std::io::Write;

/// Formats check output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    diagnostics: Vec<JsonDiagnostic>,
    summary: Summary,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    key: String,
    severity: String,
    message: String,
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(&self, reports: &[CheckReport], writer: &mut W) -> std::io::Result<()> {
        let diagnostics = reports
            .iter()
            .flat_map(|report| {
                report.diagnostics.iter().map(move |d| JsonDiagnostic {
                    key: d.rule_id.to_string(),
                    severity: serde_json::to_value(d.severity)
                        .ok()
                        .and_then(|v| v.as_str().map(String::from))
                        .unwrap_or_default(),
                    message: d.message.clone(),
                    file: report.file.display().to_string(),
                    line: d.span.as_ref().map(|s| s.start_line),
                    column: d.span.as_ref().map(|s| s.start_col),
                    end_column: d.span.as_ref().map(|s| s.end_col),
                    suggestion: d.suggestion.clone(),
                })
            })
            .collect();

        let output = JsonOutput {
            diagnostics,
            summary: Summary::of(reports),
        };

        serde_json::to_writer_pretty(writer, &output).map_err(std::io::Error::other)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::output::testing::report;
    use crate::lint::{LintDiagnostic, RuleId, Severity, Span};

    fn render(reports: &[CheckReport]) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new().format(reports, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn produces_valid_json() {
        let parsed = render(&[report(
            "a.dsc",
            vec![LintDiagnostic::new(RuleId::new("no_type_key"), Severity::Error, "Error message")],
        )]);

        assert!(parsed["diagnostics"].is_array());
        assert_eq!(parsed["diagnostics"][0]["key"], "no_type_key");
        assert_eq!(parsed["diagnostics"][0]["file"], "a.dsc");
        assert_eq!(parsed["summary"]["errors"], 1);
    }

    #[test]
    fn includes_location_when_present() {
        let parsed = render(&[report(
            "a.dsc",
            vec![LintDiagnostic::new(RuleId::new("bad_quotes"), Severity::Warning, "msg")
                .with_span(Span::new("a.dsc", 10, 5, 10, 20))],
        )]);

        assert_eq!(parsed["diagnostics"][0]["line"], 10);
        assert_eq!(parsed["diagnostics"][0]["column"], 5);
        assert_eq!(parsed["diagnostics"][0]["end_column"], 20);
    }

    #[test]
    fn omits_location_when_absent() {
        let parsed = render(&[report(
            "a.dsc",
            vec![LintDiagnostic::new(RuleId::new("stat_lines"), Severity::Info, "msg")],
        )]);

        assert!(parsed["diagnostics"][0]["line"].is_null());
        assert_eq!(parsed["diagnostics"][0]["severity"], "info");
    }

    #[test]
    fn summary_counts_by_severity_and_includes_stats() {
        let parsed = render(&[report(
            "a.dsc",
            vec![
                LintDiagnostic::new(RuleId::new("r1"), Severity::Error, "e1"),
                LintDiagnostic::new(RuleId::new("r2"), Severity::Error, "e2"),
                LintDiagnostic::new(RuleId::new("r3"), Severity::Warning, "w1"),
                LintDiagnostic::new(RuleId::new("r4"), Severity::MinorWarning, "m1"),
            ],
        )]);

        assert_eq!(parsed["summary"]["errors"], 2);
        assert_eq!(parsed["summary"]["warnings"], 1);
        assert_eq!(parsed["summary"]["minor_warnings"], 1);
        assert_eq!(parsed["summary"]["suppressed"], 1);
        assert_eq!(parsed["summary"]["structural_lines"], 4);
        assert_eq!(parsed["diagnostics"][3]["severity"], "minor_warning");
    }

    #[test]
    fn empty_run() {
        let parsed = render(&[]);
        assert_eq!(parsed["summary"]["files"], 0);
        assert_eq!(parsed["diagnostics"].as_array().unwrap().len(), 0);
    }
}
