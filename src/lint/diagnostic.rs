//! Lint diagnostic messages.
//!
//! This module provides the [`LintDiagnostic`] type for representing
//! problems found in a script, with optional source location tracking for
//! precise reporting.

use super::rule::{RuleId, Severity};
use super::span::Span;

/// A diagnostic produced while checking a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintDiagnostic {
    /// Stable key of the problem.
    pub rule_id: RuleId,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Optional source location.
    pub span: Option<Span>,
    /// Optional suggestion for fixing the issue.
    pub suggestion: Option<String>,
}

impl LintDiagnostic {
    /// Create a new diagnostic.
    pub fn new(rule_id: RuleId, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            severity,
            message: message.into(),
            span: None,
            suggestion: None,
        }
    }

    /// Add a source span to this diagnostic.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Add a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Line the diagnostic points at (1-indexed), if any.
    pub fn line(&self) -> Option<usize> {
        self.span.as_ref().map(|s| s.start_line)
    }
}
