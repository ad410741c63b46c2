//! scriptcheck - Static analysis for indentation-sensitive container scripts.
//!
//! scriptcheck reads script files made of named containers, checks their
//! structure, commands, event lines and tag expressions against a
//! documentation model, and reports diagnostics without running anything.
//!
//! # Modules
//!
//! - [`analysis`] - Event matcher compilation and tag type tracing
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.scriptcheck.yml` discovery and loading
//! - [`error`] - Error types and result aliases
//! - [`lint`] - The script checker, its rules and output formatters
//! - [`meta`] - The documentation model and its loader
//! - [`parse`] - Matchers, tag parsing, source preparation and structure
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use scriptcheck::lint::{ScriptChecker, Severity};
//! use scriptcheck::meta::{loader, ModelBuilder};
//!
//! let mut sources = loader::LoadedSources::default();
//! loader::parse_meta_text(
//!     "<--[command]\n@name narrate\n@syntax narrate [<text>]\n@required 1\n@maximum 1\n-->",
//!     "inline",
//!     &mut sources,
//! );
//! let model = ModelBuilder::from_sources(sources).build();
//!
//! let script = "greet:\n    type: task\n    script:\n    - narrate hello\n    - narate oops\n";
//! let report = ScriptChecker::new(&model).check(Path::new("greet.dsc"), script);
//!
//! let errors: Vec<_> = report.at_least(Severity::Error).map(|d| d.rule_id.as_str()).collect();
//! assert_eq!(errors, ["unknown_command"]);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod meta;
pub mod parse;
pub mod ui;

pub use error::{Result, ScriptCheckError};
