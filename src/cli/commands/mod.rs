//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and hands them the project
//! settings resolved from global flags and `.scriptcheck.yml`.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod docs;
pub mod meta;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, Project};
