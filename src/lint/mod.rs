//! Script checking.
//!
//! This module turns a script file into a list of diagnostics.
//!
//! # Overview
//!
//! The checker consists of:
//!
//! - **Checker** - Runs every check over one file ([`ScriptChecker`])
//! - **Containers** - The known container types and their keys ([`ScriptType`])
//! - **Command rules** - Per-command checks and context updates ([`CommandRuleRegistry`])
//! - **Collector** - Deduplicates and suppresses findings ([`DiagnosticCollector`])
//! - **Diagnostics** - Problem reports with severity and suggestions ([`LintDiagnostic`])
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use scriptcheck::lint::{ScriptChecker, Severity};
//! use scriptcheck::meta::DocumentationModel;
//!
//! let model = DocumentationModel::empty();
//! let checker = ScriptChecker::new(&model);
//! let report = checker.check(Path::new("my.dsc"), "mytask:\n    type: task\n");
//!
//! let keys: Vec<_> = report.at_least(Severity::Warning).map(|d| d.rule_id.as_str()).collect();
//! assert_eq!(keys, ["missing_key_task"]);
//! ```

pub mod args;
pub mod checker;
pub mod collector;
pub mod containers;
pub mod context;
pub mod diagnostic;
pub mod event_keys;
pub mod output;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod span;
pub mod tags;

pub use args::{split_command, CommandArg, SplitCommand};
pub use checker::{CheckReport, CheckStats, ScriptChecker};
pub use collector::DiagnosticCollector;
pub use containers::{script_type, KeyKind, KeyShape, ScriptType};
pub use context::ScriptCheckContext;
pub use diagnostic::LintDiagnostic;
pub use output::{
    write_reports, HumanFormatter, JsonFormatter, LintFormatter, OutputFormat, SarifFormatter,
    Summary,
};
pub use registry::{CommandCheck, CommandRule, CommandRuleRegistry};
pub use rule::{RuleId, Severity};
pub use span::Span;
