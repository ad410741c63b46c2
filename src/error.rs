//! Error types for scriptcheck operations.
//!
//! This module defines [`ScriptCheckError`], the error type used by the
//! configuration, documentation-loading and CLI layers, and a [`Result`]
//! type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Problems found *inside* a script are never errors: the checker turns
//!   them into [`crate::lint::LintDiagnostic`]s
//! - Use `ScriptCheckError` for failures around the analysis (missing files,
//!   unreadable configuration, broken documentation sources)
//! - Use `anyhow::Error` (via `ScriptCheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for scriptcheck operations.
#[derive(Debug, Error)]
pub enum ScriptCheckError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A documentation source path does not exist.
    #[error("Documentation source not found: {path}")]
    DocsNotFound { path: PathBuf },

    /// A documentation source could not be read or understood.
    #[error("Failed to load documentation from {path}: {message}")]
    DocsLoadError { path: PathBuf, message: String },

    /// A script file could not be read.
    #[error("Failed to read script {path}: {message}")]
    ScriptReadError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for scriptcheck operations.
pub type Result<T> = std::result::Result<T, ScriptCheckError>;
