//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, OutputMode, ScriptCheckTheme, UserInterface};

/// Terminal UI implementation.
///
/// Reports go to stdout so they can be piped; status messages go to
/// stderr.
pub struct TerminalUI {
    out: Term,
    status: Term,
    theme: ScriptCheckTheme,
    mode: OutputMode,
    color: bool,
}

impl TerminalUI {
    /// Create a new terminal UI. Colors are used only when allowed and
    /// stdout is a terminal.
    pub fn new(mode: OutputMode, allow_color: bool) -> Self {
        let color = allow_color && should_use_colors();
        let theme = if color {
            ScriptCheckTheme::new()
        } else {
            ScriptCheckTheme::plain()
        };

        Self {
            out: Term::stdout(),
            status: Term::stderr(),
            theme,
            mode,
            color,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn report(&mut self, text: &str) {
        if self.mode.shows_reports() {
            write!(self.out, "{}", text).ok();
            self.out.flush().ok();
        }
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.status, "{}", self.theme.dim.apply_to(msg)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.status, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.status, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.status, "{}", self.theme.format_error(msg)).ok();
    }

    fn use_color(&self) -> bool {
        self.color
    }
}

/// Create the terminal UI for the given output mode.
pub fn create_ui(mode: OutputMode, allow_color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, allow_color))
}
