//! Configuration file discovery and loading.
//!
//! A project is configured by an optional `.scriptcheck.yml` at its root.
//! A missing file means default settings; a file given explicitly with
//! `--config` must exist.

use crate::config::schema::ScriptCheckConfig;
use crate::error::{Result, ScriptCheckError};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = ".scriptcheck.yml";

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. A directory holding `.scriptcheck.yml` (primary indicator)
/// 2. A `.git` directory (fallback)
///
/// # Returns
///
/// The path to the project root, or None if not found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Path of the project config file, if it exists.
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ScriptCheckConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ScriptCheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ScriptCheckError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a config.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<ScriptCheckConfig> {
    if content.trim().is_empty() {
        return Ok(ScriptCheckConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ScriptCheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, that file must exist. Otherwise the
/// project's `.scriptcheck.yml` is used when present, and defaults when not.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ScriptCheckConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }
    match find_config_file(project_root) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading project config");
            load_config_file(&path)
        }
        None => Ok(ScriptCheckConfig::default()),
    }
}
