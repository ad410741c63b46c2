//! Diagnostic accumulation for one checked file.
//!
//! [`DiagnosticCollector`] is the single sink every check reports into.
//! It drops a diagnostic whose (line, key) pair was already reported and
//! counts diagnostics whose key is suppressed instead of keeping them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::diagnostic::LintDiagnostic;
use super::rule::{RuleId, Severity};
use super::span::Span;

/// Collects diagnostics for a single file.
#[derive(Debug)]
pub struct DiagnosticCollector {
    file: PathBuf,
    diagnostics: Vec<LintDiagnostic>,
    seen: HashSet<(Option<usize>, String)>,
    suppressed_keys: HashSet<String>,
    suppressed: usize,
}

impl DiagnosticCollector {
    /// Create a collector for `file` that suppresses the given keys.
    pub fn new(file: impl Into<PathBuf>, suppressed_keys: HashSet<String>) -> Self {
        Self {
            file: file.into(),
            diagnostics: Vec::new(),
            seen: HashSet::new(),
            suppressed_keys,
            suppressed: 0,
        }
    }

    /// File the diagnostics belong to.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Record a diagnostic.
    ///
    /// Returns `true` if it was kept.
    pub fn push(&mut self, diagnostic: LintDiagnostic) -> bool {
        let key = diagnostic.rule_id.as_str();
        if self.suppressed_keys.contains(key) {
            self.suppressed += 1;
            return false;
        }
        if !self.seen.insert((diagnostic.line(), key.to_string())) {
            tracing::trace!(key, line = ?diagnostic.line(), "dropping duplicate diagnostic");
            return false;
        }
        self.diagnostics.push(diagnostic);
        true
    }

    /// Report a problem at a 0-indexed line and column range.
    pub fn report(
        &mut self,
        key: &str,
        severity: Severity,
        line: usize,
        start: usize,
        end: usize,
        message: impl Into<String>,
    ) -> bool {
        let span = Span::from_zero(&self.file, line, start, end);
        self.push(LintDiagnostic::new(RuleId::new(key), severity, message).with_span(span))
    }

    /// Report a problem with a fix suggestion.
    #[allow(clippy::too_many_arguments)]
    pub fn report_with_suggestion(
        &mut self,
        key: &str,
        severity: Severity,
        line: usize,
        start: usize,
        end: usize,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> bool {
        let span = Span::from_zero(&self.file, line, start, end);
        self.push(
            LintDiagnostic::new(RuleId::new(key), severity, message)
                .with_span(span)
                .with_suggestion(suggestion),
        )
    }

    /// Number of diagnostics kept so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether nothing has been kept yet.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics dropped by suppression.
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Consume the collector, returning the kept diagnostics and the
    /// suppressed count.
    pub fn finish(self) -> (Vec<LintDiagnostic>, usize) {
        (self.diagnostics, self.suppressed)
    }
}
