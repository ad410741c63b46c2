//! Configuration schema for `.scriptcheck.yml`.

use crate::lint::{OutputFormat, Severity};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for `.scriptcheck.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptCheckConfig {
    /// Documentation sources (files or directories), relative to the
    /// project root.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<PathBuf>,

    /// Diagnostic keys suppressed in every file.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// Lowest severity reported.
    pub min_severity: Severity,

    /// Default output format.
    pub format: OutputFormat,

    /// Fail the run on warnings as well as errors.
    #[serde(skip_serializing_if = "is_false")]
    pub strict: bool,
}

impl Default for ScriptCheckConfig {
    fn default() -> Self {
        Self {
            docs: Vec::new(),
            ignore: Vec::new(),
            min_severity: Severity::MinorWarning,
            format: OutputFormat::default(),
            strict: false,
        }
    }
}

impl ScriptCheckConfig {
    /// Documentation paths made absolute against `root`.
    pub fn docs_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.docs
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { root.join(p) })
            .collect()
    }

    /// Lowest severity that fails the run.
    pub fn failure_threshold(&self) -> Severity {
        if self.strict {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
