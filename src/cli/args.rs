//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::lint::{OutputFormat, Severity};

/// scriptcheck - Static checker for container scripts.
#[derive(Debug, Parser)]
#[command(name = "scriptcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .scriptcheck.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides discovery from the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print reports
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check script files
    Check(CheckArgs),

    /// Look up documentation
    Meta(MetaArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Script files or directories (directories are searched for .dsc files)
    pub files: Vec<PathBuf>,

    /// Documentation sources (overrides `docs` in the config file)
    #[arg(long = "docs", value_name = "PATH")]
    pub docs: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Treat warnings as failures
    #[arg(long)]
    pub strict: bool,

    /// Lowest severity to report
    #[arg(long, value_enum)]
    pub min_severity: Option<Severity>,
}

/// Arguments for the `meta` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MetaArgs {
    /// Tag (`<player.name>`) or search terms
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Documentation sources (overrides `docs` in the config file)
    #[arg(long = "docs", value_name = "PATH")]
    pub docs: Vec<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
