//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, ScriptCheckConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Exit code for a clean run.
pub const EXIT_CLEAN: i32 = 0;
/// Exit code when problems at or above the failure threshold were found.
pub const EXIT_PROBLEMS: i32 = 1;
/// Exit code for missing input or broken configuration.
pub const EXIT_USAGE: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying reports and status
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: EXIT_CLEAN,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// A project root with its loaded configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ScriptCheckConfig,
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Loads the project configuration (except for `completions`), then
    /// routes the CLI subcommand to its implementation. A configuration
    /// problem is reported and ends the run with [`EXIT_USAGE`].
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Commands::Completions(args) = &cli.command {
            return super::completions::CompletionsCommand::new(args.clone()).execute(ui);
        }

        let config = match load_config(&self.project_root, cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_USAGE));
            }
        };
        let project = Project {
            root: self.project_root.clone(),
            config,
        };

        match &cli.command {
            Commands::Check(args) => {
                super::check::CheckCommand::new(project, args.clone()).execute(ui)
            }
            Commands::Meta(args) => super::meta::MetaCommand::new(project, args.clone()).execute(ui),
            Commands::Completions(_) => unreachable!("handled above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn broken_config_exits_with_usage_code() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".scriptcheck.yml"), "ignore: [unclosed").unwrap();
        let cli = Cli::try_parse_from(["scriptcheck", "check"]).unwrap();
        let mut ui = MockUI::new();

        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&cli, &mut ui)
            .unwrap();

        assert_eq!(result.exit_code, EXIT_USAGE);
        assert!(ui.has_error("Failed to parse config"));
    }
}
