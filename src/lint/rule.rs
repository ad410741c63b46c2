//! Diagnostic keys and severities.
//!
//! - [`RuleId`] - Stable key identifying a kind of problem (`unknown_command`)
//! - [`Severity`] - Severity level (Info, MinorWarning, Warning, Error)

use serde::{Deserialize, Serialize};

/// Stable key of a diagnostic, used for deduplication and suppression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Severity {
    /// Statistics and other non-actionable notes.
    Info,
    /// Style and hygiene.
    MinorWarning,
    /// Likely wrong, but the script can still be read.
    Warning,
    /// Broken enough that the construct cannot be trusted.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::MinorWarning => write!(f, "minor warning"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_id_equality() {
        let id1 = RuleId::new("unknown_command");
        let id2 = RuleId::new("unknown_command");
        let id3 = RuleId::new("bad_quotes");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn rule_id_display() {
        let id = RuleId::new("missing_key_task");
        assert_eq!(format!("{}", id), "missing_key_task");
        assert_eq!(id.as_str(), "missing_key_task");
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::MinorWarning);
        assert!(Severity::MinorWarning < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Info), "info");
        assert_eq!(format!("{}", Severity::MinorWarning), "minor warning");
        assert_eq!(format!("{}", Severity::Warning), "warning");
        assert_eq!(format!("{}", Severity::Error), "error");
    }

    #[test]
    fn severity_deserializes_snake_case() {
        let severity: Severity = serde_yaml::from_str("minor_warning").unwrap();
        assert_eq!(severity, Severity::MinorWarning);
    }
}
