//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing reports to stdout and status to stderr
//! - [`MockUI`] capturing everything for tests
//!
//! # Example
//!
//! ```
//! use scriptcheck::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.report("error[tabs]: This file uses tab characters\n");
//! ui.success("Checked 1 file");
//! assert_eq!(ui.report_text(), "error[tabs]: This file uses tab characters\n");
//! assert!(ui.has_success("Checked 1 file"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ScriptCheckTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Write report text (formatted diagnostics, lookup results). Shown in
    /// every mode except silent.
    fn report(&mut self, text: &str);

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Whether report text may be colored.
    fn use_color(&self) -> bool;
}
