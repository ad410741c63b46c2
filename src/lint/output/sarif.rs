//! SARIF output formatter.
//!
//! SARIF (Static Analysis Results Interchange Format) is an OASIS standard
//! for static analysis tools, supported by GitHub, VS Code, and other tools.

use super::LintFormatter;
use crate::lint::checker::CheckReport;
use crate::lint::Severity;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

/// SARIF version we generate.
const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

/// Formats check output as SARIF.
pub struct SarifFormatter {
    /// Tool name to report.
    pub tool_name: String,
    /// Tool version to report.
    pub tool_version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    short_description: SarifMessage,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: &'static str,
    message: SarifMessage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<SarifRegion>,
}

#[derive(Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    start_line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_column: Option<usize>,
}

impl SarifFormatter {
    /// Create a new SARIF formatter.
    pub fn new(tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
        }
    }

    fn severity_to_level(severity: Severity) -> &'static str {
        match severity {
            Severity::Info | Severity::MinorWarning => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl LintFormatter for SarifFormatter {
    fn format<W: Write>(&self, reports: &[CheckReport], writer: &mut W) -> std::io::Result<()> {
        let diagnostics = || reports.iter().flat_map(|r| r.diagnostics.iter().map(move |d| (r, d)));

        let rule_ids: BTreeSet<&str> = diagnostics().map(|(_, d)| d.rule_id.as_str()).collect();
        let rules: Vec<_> = rule_ids
            .into_iter()
            .map(|id| SarifRule {
                id: id.to_string(),
                short_description: SarifMessage {
                    text: id.replace('_', " "),
                },
            })
            .collect();

        let results: Vec<_> = diagnostics()
            .map(|(report, d)| {
                let region = d.span.as_ref().map(|span| SarifRegion {
                    start_line: span.start_line,
                    start_column: (span.start_col > 1).then_some(span.start_col),
                });
                SarifResult {
                    rule_id: d.rule_id.to_string(),
                    level: Self::severity_to_level(d.severity),
                    message: SarifMessage {
                        text: d.message.clone(),
                    },
                    locations: vec![SarifLocation {
                        physical_location: SarifPhysicalLocation {
                            artifact_location: SarifArtifactLocation {
                                uri: report.file.display().to_string(),
                            },
                            region,
                        },
                    }],
                }
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: self.tool_name.clone(),
                        version: self.tool_version.clone(),
                        rules,
                    },
                },
                results,
            }],
        };

        serde_json::to_writer_pretty(writer, &log).map_err(std::io::Error::other)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::output::testing::report;
    use crate::lint::{LintDiagnostic, RuleId, Span};

    fn render(reports: &[CheckReport]) -> serde_json::Value {
        let mut output = Vec::new();
        SarifFormatter::new("scriptcheck", "1.0.0")
            .format(reports, &mut output)
            .unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn produces_valid_sarif() {
        let parsed = render(&[report(
            "scripts/world.dsc",
            vec![LintDiagnostic::new(RuleId::new("unknown_event"), Severity::Warning, "Unknown event")
                .with_span(Span::line("scripts/world.dsc", 15))],
        )]);

        assert_eq!(parsed["version"], "2.1.0");
        assert!(parsed["runs"].is_array());
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "scriptcheck");
    }

    #[test]
    fn maps_severity_to_sarif_level() {
        assert_eq!(SarifFormatter::severity_to_level(Severity::Error), "error");
        assert_eq!(SarifFormatter::severity_to_level(Severity::Warning), "warning");
        assert_eq!(SarifFormatter::severity_to_level(Severity::MinorWarning), "note");
        assert_eq!(SarifFormatter::severity_to_level(Severity::Info), "note");
    }

    #[test]
    fn includes_one_rule_per_key() {
        let parsed = render(&[
            report("a.dsc", vec![LintDiagnostic::new(RuleId::new("bad_quotes"), Severity::Error, "msg1")]),
            report(
                "b.dsc",
                vec![
                    LintDiagnostic::new(RuleId::new("bad_quotes"), Severity::Error, "msg2"),
                    LintDiagnostic::new(RuleId::new("no_type_key"), Severity::Warning, "msg3"),
                ],
            ),
        ]);

        let rules = parsed["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0]["id"], "bad_quotes");
        assert_eq!(parsed["runs"][0]["results"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn includes_location_information() {
        let parsed = render(&[report(
            "scripts/a.dsc",
            vec![LintDiagnostic::new(RuleId::new("bad_switch"), Severity::Error, "Test message")
                .with_span(Span::new("scripts/a.dsc", 10, 5, 10, 20))],
        )]);

        let location = &parsed["runs"][0]["results"][0]["locations"][0];
        assert_eq!(location["physicalLocation"]["artifactLocation"]["uri"], "scripts/a.dsc");
        assert_eq!(location["physicalLocation"]["region"]["startLine"], 10);
        assert_eq!(location["physicalLocation"]["region"]["startColumn"], 5);
    }

    #[test]
    fn span_less_results_still_name_the_file() {
        let parsed = render(&[report(
            "a.dsc",
            vec![LintDiagnostic::new(RuleId::new("stat_lines"), Severity::Info, "stats")],
        )]);

        let location = &parsed["runs"][0]["results"][0]["locations"][0]["physicalLocation"];
        assert_eq!(location["artifactLocation"]["uri"], "a.dsc");
        assert!(location["region"].is_null());
    }

    #[test]
    fn omits_column_one() {
        let parsed = render(&[report(
            "a.dsc",
            vec![LintDiagnostic::new(RuleId::new("tabs"), Severity::Error, "msg")
                .with_span(Span::line("a.dsc", 10))],
        )]);

        let region = &parsed["runs"][0]["results"][0]["locations"][0]["physicalLocation"]["region"];
        assert!(region["startColumn"].is_null());
    }
}
