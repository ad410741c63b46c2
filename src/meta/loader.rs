//! Reading documentation blocks from local files.
//!
//! Documentation lives in comment blocks inside source files:
//!
//! ```text
//! // <--[command]
//! // @Name narrate
//! // @Syntax narrate [<text>] (targets:<player>|...)
//! // @Required 1
//! // @Maximum 4
//! // -->
//! ```
//!
//! Comment markers (`//`, `#`, `*`) are stripped, a block opens at
//! `<--[kind]` and closes at `-->`, and each `@key value` line starts a
//! setting whose value continues on following lines.

use crate::error::{Result, ScriptCheckError};
use crate::meta::objects::MetaObject;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions scanned when a directory is given.
pub const META_EXTENSIONS: &[&str] = &["java", "dsc", "meta", "txt"];

/// Objects read from documentation sources, plus non-fatal problems.
#[derive(Debug, Default)]
pub struct LoadedSources {
    pub objects: Vec<MetaObject>,
    /// Human-readable load warnings (`source:line: message`).
    pub warnings: Vec<String>,
    /// Number of files read.
    pub files: usize,
}

/// Load every documentation block from the given files and directories.
///
/// # Errors
///
/// Returns [`ScriptCheckError::DocsNotFound`] for a missing path and
/// [`ScriptCheckError::DocsLoadError`] when a file cannot be read.
pub fn load_meta_sources(paths: &[PathBuf]) -> Result<LoadedSources> {
    let mut loaded = LoadedSources::default();
    for path in paths {
        if !path.exists() {
            return Err(ScriptCheckError::DocsNotFound { path: path.clone() });
        }
        load_path(path, &mut loaded)?;
    }
    tracing::debug!(
        files = loaded.files,
        objects = loaded.objects.len(),
        warnings = loaded.warnings.len(),
        "Loaded documentation sources"
    );
    Ok(loaded)
}

fn load_path(path: &Path, loaded: &mut LoadedSources) -> Result<()> {
    if path.is_dir() {
        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();
        for entry in entries {
            if entry.is_dir() || has_meta_extension(&entry) {
                load_path(&entry, loaded)?;
            }
        }
        return Ok(());
    }

    let content = fs::read_to_string(path).map_err(|e| ScriptCheckError::DocsLoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    loaded.files += 1;
    parse_meta_text(&content, &path.display().to_string(), loaded);
    Ok(())
}

fn has_meta_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| META_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

struct OpenBlock {
    object: Option<MetaObject>,
    kind: String,
    start_line: usize,
    setting: Option<(String, String, usize)>,
}

/// Parse documentation blocks out of one source text.
pub fn parse_meta_text(text: &str, source: &str, loaded: &mut LoadedSources) {
    let mut block: Option<OpenBlock> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_comment_markers(raw);

        if let Some(kind) = block_start(line) {
            if let Some(open) = block.take() {
                loaded.warnings.push(format!(
                    "{}:{}: {} block was never closed with '-->'",
                    source, open.start_line, open.kind
                ));
            }
            let object = MetaObject::for_kind(kind);
            if object.is_none() {
                tracing::debug!(kind, source, "Skipping unknown documentation kind");
                loaded.warnings.push(format!(
                    "{}:{}: unknown documentation kind '{}'",
                    source, line_number, kind
                ));
            }
            block = Some(OpenBlock {
                object,
                kind: kind.to_string(),
                start_line: line_number,
                setting: None,
            });
            continue;
        }

        let Some(open) = block.as_mut() else {
            continue;
        };

        if line.starts_with("-->") {
            if let Some(open) = block.take() {
                finish_block(open, source, loaded);
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix('@') {
            flush_setting(open, source, loaded);
            let (key, value) = match rest.split_once(char::is_whitespace) {
                Some((key, value)) => (key, value.trim()),
                None => (rest, ""),
            };
            open.setting = Some((key.to_string(), value.to_string(), line_number));
        } else if let Some((_, value, _)) = open.setting.as_mut() {
            if !value.is_empty() {
                value.push('\n');
            }
            value.push_str(line);
        }
    }

    if let Some(open) = block {
        loaded.warnings.push(format!(
            "{}:{}: {} block was never closed with '-->'",
            source, open.start_line, open.kind
        ));
    }
}

fn strip_comment_markers(raw: &str) -> &str {
    let mut line = raw.trim();
    loop {
        let stripped = line
            .strip_prefix("//")
            .or_else(|| line.strip_prefix('#'))
            .or_else(|| line.strip_prefix('*'));
        match stripped {
            Some(rest) => line = rest.trim_start(),
            None => return line,
        }
    }
}

fn block_start(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("<--[")?;
    let end = rest.find(']')?;
    Some(rest[..end].trim())
}

fn flush_setting(open: &mut OpenBlock, source: &str, loaded: &mut LoadedSources) {
    let Some((key, value, line)) = open.setting.take() else {
        return;
    };
    if let Some(object) = open.object.as_mut() {
        if let Err(message) = object.apply_setting(&key, value.trim_end()) {
            loaded.warnings.push(format!("{}:{}: {}", source, line, message));
        }
    }
}

fn finish_block(mut open: OpenBlock, source: &str, loaded: &mut LoadedSources) {
    flush_setting(&mut open, source, loaded);
    let Some(object) = open.object else {
        return;
    };
    let missing = object.post_check();
    if missing.is_empty() {
        loaded.objects.push(object);
    } else {
        for message in missing {
            loaded
                .warnings
                .push(format!("{}:{}: {}", source, open.start_line, message));
        }
    }
}
