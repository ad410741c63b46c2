//! Check command implementation.
//!
//! The `scriptcheck check` command checks script files and reports every
//! diagnostic at or above the configured severity.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::error::{Result, ScriptCheckError};
use crate::lint::{write_reports, ScriptChecker, Severity, Summary};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, Project, EXIT_PROBLEMS, EXIT_USAGE};
use super::docs::{docs_paths, load_model};

/// Extension of script files found when searching directories.
pub const SCRIPT_EXTENSION: &str = "dsc";

/// The check command implementation.
pub struct CheckCommand {
    project: Project,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project: Project, args: CheckArgs) -> Self {
        Self { project, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn min_severity(&self) -> Severity {
        self.args
            .min_severity
            .unwrap_or(self.project.config.min_severity)
    }

    fn failure_threshold(&self) -> Severity {
        if self.args.strict {
            Severity::Warning
        } else {
            self.project.config.failure_threshold()
        }
    }

    /// Files named on the command line, or the project root when none are.
    fn inputs(&self) -> Vec<PathBuf> {
        if self.args.files.is_empty() {
            vec![self.project.root.clone()]
        } else {
            self.args.files.clone()
        }
    }
}

/// Expand directories into the `.dsc` files below them, sorted.
///
/// # Errors
///
/// Returns `ScriptReadError` for a path that does not exist.
pub fn collect_scripts(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut scripts = Vec::new();
    for input in inputs {
        if input.is_dir() {
            walk_dir(input, &mut scripts)?;
        } else if input.exists() {
            scripts.push(input.clone());
        } else {
            return Err(ScriptCheckError::ScriptReadError {
                path: input.clone(),
                message: "no such file or directory".to_string(),
            });
        }
    }
    Ok(scripts)
}

fn walk_dir(dir: &Path, scripts: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    for entry in entries {
        let hidden = entry
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }
        if entry.is_dir() {
            walk_dir(&entry, scripts)?;
        } else if entry
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(SCRIPT_EXTENSION))
        {
            scripts.push(entry);
        }
    }
    Ok(())
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let scripts = match collect_scripts(&self.inputs()) {
            Ok(scripts) => scripts,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_USAGE));
            }
        };
        if scripts.is_empty() {
            ui.error("No script files found");
            return Ok(CommandResult::failure(EXIT_USAGE));
        }

        let docs = docs_paths(&self.project, &self.args.docs);
        let model = match load_model(&docs, ui) {
            Ok(model) => model,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_USAGE));
            }
        };

        let checker = ScriptChecker::new(&model).with_ignored(&self.project.config.ignore);
        let min = self.min_severity();
        let mut reports = Vec::with_capacity(scripts.len());
        let mut unreadable = 0;
        for script in &scripts {
            if ui.output_mode().shows_details() {
                ui.message(&format!("Checking {}", script.display()));
            }
            match checker.check_file(script) {
                Ok(mut report) => {
                    report.diagnostics.retain(|d| d.severity >= min);
                    reports.push(report);
                }
                Err(e) => {
                    ui.error(&e.to_string());
                    unreadable += 1;
                }
            }
        }

        let format = self.args.format.unwrap_or(self.project.config.format);
        let mut output = Vec::new();
        write_reports(format, &reports, ui.use_color(), &mut output)?;
        let mut text = String::from_utf8_lossy(&output).into_owned();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        ui.report(&text);

        let threshold = self.failure_threshold();
        let failing = reports
            .iter()
            .any(|r| r.at_least(threshold).next().is_some());

        if unreadable > 0 {
            return Ok(CommandResult::failure(EXIT_USAGE));
        }
        if failing {
            return Ok(CommandResult::failure(EXIT_PROBLEMS));
        }
        let summary = Summary::of(&reports);
        ui.success(&format!("Checked {} file(s)", summary.files));
        Ok(CommandResult::success())
    }
}
