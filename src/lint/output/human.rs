//! Human-readable output formatter.
//!
//! Formats check reports for terminal display with optional color support.

use super::{LintFormatter, Summary};
use crate::lint::checker::CheckReport;
use crate::lint::{LintDiagnostic, Severity};
use console::Style;
use std::io::Write;

/// Formats check output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn severity_style(&self, severity: Severity) -> Style {
        if !self.use_color {
            return Style::new();
        }
        let style = match severity {
            Severity::Error => Style::new().red().bold(),
            Severity::Warning => Style::new().yellow().bold(),
            Severity::MinorWarning => Style::new().cyan(),
            Severity::Info => Style::new().dim(),
        };
        style.force_styling(true)
    }

    fn write_diagnostic<W: Write>(&self, diag: &LintDiagnostic, writer: &mut W) -> std::io::Result<()> {
        // Header line: error[key]: message
        let header = format!("{}[{}]", diag.severity, diag.rule_id);
        writeln!(
            writer,
            "{}: {}",
            self.severity_style(diag.severity).apply_to(header),
            diag.message
        )?;

        if let Some(ref span) = diag.span {
            writeln!(
                writer,
                "  --> {}:{}:{}",
                span.file.display(),
                span.start_line,
                span.start_col
            )?;
        }

        if let Some(ref suggestion) = diag.suggestion {
            writeln!(writer, "   = help: {}", suggestion)?;
        }

        writeln!(writer)
    }
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(&self, reports: &[CheckReport], writer: &mut W) -> std::io::Result<()> {
        for report in reports {
            for diag in &report.diagnostics {
                self.write_diagnostic(diag, writer)?;
            }
        }

        let summary = Summary::of(reports);
        if summary.problems() > 0 {
            writeln!(
                writer,
                "Found {} error(s), {} warning(s) and {} minor warning(s) in {} file(s)",
                summary.errors, summary.warnings, summary.minor_warnings, summary.files
            )?;
        } else {
            writeln!(writer, "No problems found in {} file(s)", summary.files)?;
        }
        if summary.stats.suppressed > 0 {
            writeln!(writer, "{} diagnostic(s) suppressed", summary.stats.suppressed)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::output::testing::report;
    use crate::lint::{RuleId, Span};

    fn render(reports: &[CheckReport]) -> String {
        let mut output = Vec::new();
        HumanFormatter::new(false).format(reports, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn formats_error_diagnostic() {
        let output = render(&[report(
            "scripts/main.dsc",
            vec![LintDiagnostic::new(RuleId::new("unknown_command"), Severity::Error, "Unknown command 'narate'")
                .with_span(Span::new("scripts/main.dsc", 10, 7, 10, 13))],
        )]);

        assert!(output.contains("error[unknown_command]: Unknown command 'narate'"));
        assert!(output.contains("  --> scripts/main.dsc:10:7"));
    }

    #[test]
    fn full_report_layout() {
        let output = render(&[report(
            "a.dsc",
            vec![LintDiagnostic::new(RuleId::new("unknown_command"), Severity::Error, "Unknown command 'narate'")
                .with_span(Span::new("a.dsc", 2, 5, 2, 11))],
        )]);

        insta::assert_snapshot!(output, @r"
error[unknown_command]: Unknown command 'narate'
  --> a.dsc:2:5

Found 1 error(s), 0 warning(s) and 0 minor warning(s) in 1 file(s)
1 diagnostic(s) suppressed
");
    }

    #[test]
    fn formats_minor_warning_diagnostic() {
        let output = render(&[report(
            "a.dsc",
            vec![LintDiagnostic::new(RuleId::new("stray_space_eol"), Severity::MinorWarning, "Stray whitespace")],
        )]);

        assert!(output.contains("minor warning[stray_space_eol]"));
    }

    #[test]
    fn formats_summary_line() {
        let output = render(&[report(
            "a.dsc",
            vec![
                LintDiagnostic::new(RuleId::new("r1"), Severity::Error, "err"),
                LintDiagnostic::new(RuleId::new("r2"), Severity::Warning, "warn"),
                LintDiagnostic::new(RuleId::new("r3"), Severity::Warning, "warn2"),
            ],
        )]);

        assert!(output.contains("Found 1 error(s), 2 warning(s) and 0 minor warning(s) in 1 file(s)"));
        assert!(output.contains("1 diagnostic(s) suppressed"));
    }

    #[test]
    fn formats_suggestion() {
        let output = render(&[report(
            "a.dsc",
            vec![LintDiagnostic::new(RuleId::new("unknown_event"), Severity::Warning, "Unknown event")
                .with_suggestion("Possible matches: player breaks block")],
        )]);

        assert!(output.contains("= help: Possible matches: player breaks block"));
    }

    #[test]
    fn clean_run_says_so() {
        let output = render(&[report("a.dsc", vec![])]);

        assert!(!output.contains("Found"));
        assert!(output.contains("No problems found in 1 file(s)"));
    }

    #[test]
    fn colors_only_when_asked() {
        let reports = [report(
            "a.dsc",
            vec![LintDiagnostic::new(RuleId::new("r"), Severity::Error, "e")],
        )];
        let mut colored = Vec::new();
        HumanFormatter::new(true).format(&reports, &mut colored).unwrap();
        assert!(String::from_utf8(colored).unwrap().contains('\u{1b}'));
        assert!(!render(&reports).contains('\u{1b}'));
    }
}
