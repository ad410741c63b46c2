//! Project configuration.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use scriptcheck::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".scriptcheck.yml"), "ignore: [stray_space_eol]").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.ignore, vec!["stray_space_eol".to_string()]);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    find_config_file, find_project_root, load_config, load_config_file, parse_config,
    CONFIG_FILE_NAME,
};
pub use schema::ScriptCheckConfig;
