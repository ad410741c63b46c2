//! Source preparation ahead of structural parsing.
//!
//! Scripts arrive as raw text with mixed tabs and spaces, comments, and
//! `##ignorewarning <key>` directives. [`PreparedSource::new`] normalizes
//! tabs, blanks out comment lines, collects the ignore directives and
//! counts line statistics.

use std::collections::HashSet;

/// Number of spaces a tab expands to.
pub const TAB_WIDTH: usize = 4;

const IGNORE_DIRECTIVE: &str = "##ignorewarning";

/// Line counts gathered while preparing and parsing a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    /// Non-blank, non-comment lines that are not list entries.
    pub structural_lines: usize,
    /// List entry (`- ...`) lines.
    pub code_lines: usize,
    /// Comment lines.
    pub comment_lines: usize,
    /// Blank lines.
    pub blank_lines: usize,
}

/// A script ready for structural parsing.
#[derive(Debug, Clone)]
pub struct PreparedSource {
    /// Original lines, unmodified.
    pub original: Vec<String>,
    /// Tab-expanded lines with comments blanked out and trailing whitespace removed.
    pub cleaned: Vec<String>,
    /// Keys named by `##ignorewarning` directives (lowercased).
    pub ignored_keys: HashSet<String>,
    /// Lines holding an `##ignorewarning` directive with no key (0-indexed).
    pub empty_directives: Vec<usize>,
    /// Whether the raw text contains tab characters.
    pub has_tabs: bool,
    /// Line counts.
    pub stats: LineStats,
}

impl PreparedSource {
    /// Prepare raw script text.
    pub fn new(text: &str) -> Self {
        let original: Vec<String> = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        let mut prepared = Self {
            cleaned: Vec::with_capacity(original.len()),
            original,
            ignored_keys: HashSet::new(),
            empty_directives: Vec::new(),
            has_tabs: text.contains('\t'),
            stats: LineStats::default(),
        };

        for (index, line) in prepared.original.iter().enumerate() {
            let expanded = line.replace('\t', &" ".repeat(TAB_WIDTH));
            let trimmed = expanded.trim();
            if trimmed.is_empty() {
                prepared.stats.blank_lines += 1;
                prepared.cleaned.push(String::new());
                continue;
            }
            if trimmed.starts_with('#') {
                prepared.stats.comment_lines += 1;
                let lowered = trimmed.to_lowercase();
                if let Some(rest) = lowered.strip_prefix(IGNORE_DIRECTIVE) {
                    let key = rest.trim();
                    if key.is_empty() {
                        prepared.empty_directives.push(index);
                    } else {
                        prepared.ignored_keys.insert(key.to_string());
                    }
                }
                prepared.cleaned.push(String::new());
                continue;
            }
            if trimmed.starts_with('-') {
                prepared.stats.code_lines += 1;
            } else {
                prepared.stats.structural_lines += 1;
            }
            prepared.cleaned.push(expanded.trim_end().to_string());
        }

        prepared
    }
}

/// Count leading spaces of an already tab-expanded line.
pub fn indentation_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
