//! Indentation-aware structure parsing.
//!
//! Script containers are written in a YAML-like layout where indentation
//! opens sections, `key: value` lines hold scalars, `key:` lines open a
//! nested section and `- entry` lines build ordered lists. Lists entries
//! ending in `:` open a nested command block.
//!
//! ```text
//! my_task:
//!     type: task
//!     script:
//!     - if <player.is_op>:
//!         - narrate hello
//! ```
//!
//! [`parse_structure`] builds a [`StructureNode`] tree from prepared lines.
//! It never fails: lines that do not fit the structure are reported as
//! [`StructureIssue`]s and skipped rather than guessed at.

use super::source::indentation_of;

/// A string that remembers where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTrackedString {
    /// Text exactly as written (trimmed).
    pub text: String,
    /// Lowercased text, used for lookups.
    pub low: String,
    /// Source line (0-indexed).
    pub line: usize,
    /// Starting column in the tab-expanded line (0-indexed).
    pub start: usize,
}

impl LineTrackedString {
    /// Create a tracked string.
    pub fn new(text: impl Into<String>, line: usize, start: usize) -> Self {
        let text = text.into();
        let low = text.to_lowercase();
        Self {
            text,
            low,
            line,
            start,
        }
    }

    /// Column one past the last character.
    pub fn end(&self) -> usize {
        self.start + self.text.chars().count()
    }
}

/// A node of the parsed structure tree.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureNode {
    /// A single value.
    Scalar(LineTrackedString),
    /// Ordered entries. A command with a nested block is a one-entry
    /// [`StructureNode::Map`] whose value is the block's list.
    List(Vec<StructureNode>),
    /// Insertion-ordered keys.
    Map(Vec<(LineTrackedString, StructureNode)>),
}

impl StructureNode {
    /// Scalar value, if this is one.
    pub fn as_scalar(&self) -> Option<&LineTrackedString> {
        match self {
            StructureNode::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// List entries, if this is a list.
    pub fn as_list(&self) -> Option<&[StructureNode]> {
        match self {
            StructureNode::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map entries, if this is a map.
    pub fn as_map(&self) -> Option<&[(LineTrackedString, StructureNode)]> {
        match self {
            StructureNode::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a map key by its lowercased text.
    pub fn get(&self, key: &str) -> Option<(&LineTrackedString, &StructureNode)> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.low == key)
            .map(|(k, v)| (k, v))
    }

    /// Short human name of the node kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            StructureNode::Scalar(_) => "value",
            StructureNode::List(_) => "list",
            StructureNode::Map(_) => "section",
        }
    }
}

/// What went wrong on a line the parser could not place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureIssueKind {
    /// Indentation grew without a key that opens a section.
    IndentGrowth,
    /// Indentation shrank to a level never opened at this depth.
    IndentShrink,
    /// A `key:` line was followed by a line at the same indentation.
    MissingSectionIndent,
    /// A `key:` line never received any content.
    EmptySection,
    /// A non `- ` line inside a list.
    BadListEntry,
    /// A `- ` line inside a key section.
    ListInMap,
    /// A line that is neither key, value nor list entry.
    InvalidLine,
    /// The same key appears twice in one section.
    DuplicateKey,
}

impl StructureIssueKind {
    /// Stable diagnostic key.
    pub fn key(&self) -> &'static str {
        match self {
            StructureIssueKind::IndentGrowth => "bad_indent_growth",
            StructureIssueKind::IndentShrink => "bad_indent_shrink",
            StructureIssueKind::MissingSectionIndent => "missing_section_indent",
            StructureIssueKind::EmptySection => "empty_section",
            StructureIssueKind::BadListEntry => "bad_list_entry",
            StructureIssueKind::ListInMap => "list_in_map",
            StructureIssueKind::InvalidLine => "invalid_line",
            StructureIssueKind::DuplicateKey => "duplicate_key",
        }
    }
}

/// A structural problem anchored to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureIssue {
    pub kind: StructureIssueKind,
    /// Line (0-indexed).
    pub line: usize,
    /// Start column (0-indexed).
    pub start: usize,
    /// End column (0-indexed, exclusive).
    pub end: usize,
    pub message: String,
}

/// Result of structural parsing.
#[derive(Debug, Clone)]
pub struct ParsedStructure {
    /// Always a [`StructureNode::Map`] of top-level containers.
    pub root: StructureNode,
    pub issues: Vec<StructureIssue>,
}

impl ParsedStructure {
    /// Top-level container entries.
    pub fn containers(&self) -> &[(LineTrackedString, StructureNode)] {
        self.root.as_map().unwrap_or(&[])
    }
}

enum FrameBody {
    Map(Vec<(LineTrackedString, StructureNode)>),
    List(Vec<StructureNode>),
}

struct Frame {
    indent: usize,
    key: Option<LineTrackedString>,
    body: FrameBody,
    /// A list written at the same indentation as its key.
    inline: bool,
}

struct Pending {
    key: LineTrackedString,
    indent: usize,
    from_list: bool,
}

struct StructureParser {
    stack: Vec<Frame>,
    pending: Option<Pending>,
    issues: Vec<StructureIssue>,
}

/// Parse prepared (tab-expanded, comment-free) lines into a structure tree.
pub fn parse_structure(lines: &[String]) -> ParsedStructure {
    let mut parser = StructureParser {
        stack: vec![Frame {
            indent: 0,
            key: None,
            body: FrameBody::Map(Vec::new()),
            inline: false,
        }],
        pending: None,
        issues: Vec::new(),
    };

    for (index, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        parser.line(index, line);
    }
    parser.finish()
}

impl StructureParser {
    fn issue(&mut self, kind: StructureIssueKind, line: usize, start: usize, end: usize, message: String) {
        tracing::trace!(line, key = kind.key(), "structure issue");
        self.issues.push(StructureIssue {
            kind,
            line,
            start,
            end,
            message,
        });
    }

    fn line(&mut self, index: usize, line: &str) {
        let indent = indentation_of(line);
        let content = &line[indent..];

        if let Some(pending) = self.pending.take() {
            let inline = indent == pending.indent && !pending.from_list && content.starts_with('-');
            if indent > pending.indent || inline {
                let body = if content.starts_with('-') {
                    FrameBody::List(Vec::new())
                } else {
                    FrameBody::Map(Vec::new())
                };
                self.stack.push(Frame {
                    indent,
                    key: Some(pending.key),
                    body,
                    inline,
                });
                self.place(index, indent, content);
                return;
            }
            let end = pending.key.end() + 1;
            if indent == pending.indent {
                self.issue(
                    StructureIssueKind::MissingSectionIndent,
                    pending.key.line,
                    pending.key.start,
                    end,
                    format!(
                        "'{}' opens a section, but the next line is not indented further",
                        pending.key.text
                    ),
                );
            } else {
                self.issue(
                    StructureIssueKind::EmptySection,
                    pending.key.line,
                    pending.key.start,
                    end,
                    format!("Section '{}' is empty", pending.key.text),
                );
            }
        }

        let mut popped = false;
        while self.stack.len() > 1 && self.closes_at(indent, content) {
            self.pop();
            popped = true;
        }
        let top_indent = self.top().indent;
        if top_indent != indent {
            if popped {
                self.issue(
                    StructureIssueKind::IndentShrink,
                    index,
                    indent,
                    line.chars().count(),
                    format!(
                        "Indentation shrank to {} spaces, which does not match any enclosing section (expected {})",
                        indent, top_indent
                    ),
                );
            } else {
                self.issue(
                    StructureIssueKind::IndentGrowth,
                    index,
                    indent,
                    line.chars().count(),
                    "Line is indented further than its section without a 'key:' line opening a new section".to_string(),
                );
            }
            return;
        }
        self.place(index, indent, content);
    }

    fn closes_at(&self, indent: usize, content: &str) -> bool {
        let top = self.top();
        top.indent > indent || (top.inline && top.indent == indent && !content.starts_with('-'))
    }

    fn place(&mut self, index: usize, indent: usize, content: &str) {
        let is_list = matches!(self.top().body, FrameBody::List(_));
        if is_list {
            self.place_list_entry(index, indent, content);
        } else {
            self.place_map_line(index, indent, content);
        }
    }

    fn place_list_entry(&mut self, index: usize, indent: usize, content: &str) {
        let entry = match content.strip_prefix("- ") {
            Some(entry) if !entry.trim().is_empty() => entry,
            _ => {
                self.issue(
                    StructureIssueKind::BadListEntry,
                    index,
                    indent,
                    indent + content.chars().count(),
                    "Expected a list entry starting with '- '".to_string(),
                );
                return;
            }
        };
        let start = indent + 2 + (entry.len() - entry.trim_start().len());
        let text = entry.trim();
        if let Some(header) = text.strip_suffix(':') {
            self.pending = Some(Pending {
                key: LineTrackedString::new(header.trim_end(), index, start),
                indent,
                from_list: true,
            });
            return;
        }
        let value = StructureNode::Scalar(LineTrackedString::new(text, index, start));
        if let FrameBody::List(items) = &mut self.top_mut().body {
            items.push(value);
        }
    }

    fn place_map_line(&mut self, index: usize, indent: usize, content: &str) {
        if content == "-" || content.starts_with("- ") {
            self.issue(
                StructureIssueKind::ListInMap,
                index,
                indent,
                indent + content.chars().count(),
                "List entry found where a 'key: value' line was expected".to_string(),
            );
            return;
        }
        if let Some(key) = content.strip_suffix(':') {
            if !key.contains(": ") {
                self.pending = Some(Pending {
                    key: LineTrackedString::new(key.trim_end(), index, indent),
                    indent,
                    from_list: false,
                });
                return;
            }
        }
        let Some(split) = content.find(": ") else {
            self.issue(
                StructureIssueKind::InvalidLine,
                index,
                indent,
                indent + content.chars().count(),
                "Line is not a 'key: value' pair, a 'key:' section, or a '- ' list entry".to_string(),
            );
            return;
        };
        let key_text = content[..split].trim_end();
        if key_text.is_empty() {
            self.issue(
                StructureIssueKind::InvalidLine,
                index,
                indent,
                indent + content.chars().count(),
                "Line has a value but no key".to_string(),
            );
            return;
        }
        let raw_value = &content[split + 2..];
        let mut value_start = indent
            + content[..split].chars().count()
            + 2
            + (raw_value.len() - raw_value.trim_start().len());
        let mut value = raw_value.trim();
        if let Some(unquoted) = strip_matching_quotes(value) {
            value = unquoted;
            value_start += 1;
        }
        let key = LineTrackedString::new(key_text, index, indent);
        let node = StructureNode::Scalar(LineTrackedString::new(value, index, value_start));
        self.insert(key, node);
    }

    fn insert(&mut self, key: LineTrackedString, node: StructureNode) {
        let mut duplicate = None;
        match &mut self.top_mut().body {
            FrameBody::Map(entries) => {
                if entries.iter().any(|(k, _)| k.low == key.low) {
                    duplicate = Some(key);
                } else {
                    entries.push((key, node));
                }
            }
            FrameBody::List(items) => items.push(StructureNode::Map(vec![(key, node)])),
        }
        if let Some(key) = duplicate {
            let end = key.end();
            self.issue(
                StructureIssueKind::DuplicateKey,
                key.line,
                key.start,
                end,
                format!("Duplicate key '{}' in the same section", key.text),
            );
        }
    }

    fn top(&self) -> &Frame {
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn pop(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let node = match frame.body {
            FrameBody::Map(entries) => StructureNode::Map(entries),
            FrameBody::List(items) => StructureNode::List(items),
        };
        if let Some(key) = frame.key {
            self.insert(key, node);
        }
    }

    fn finish(mut self) -> ParsedStructure {
        if let Some(pending) = self.pending.take() {
            let end = pending.key.end() + 1;
            self.issue(
                StructureIssueKind::EmptySection,
                pending.key.line,
                pending.key.start,
                end,
                format!("Section '{}' is empty", pending.key.text),
            );
        }
        while self.stack.len() > 1 {
            self.pop();
        }
        let root = match self.stack.pop().map(|f| f.body) {
            Some(FrameBody::Map(entries)) => StructureNode::Map(entries),
            _ => StructureNode::Map(Vec::new()),
        };
        ParsedStructure {
            root,
            issues: self.issues,
        }
    }
}

fn strip_matching_quotes(value: &str) -> Option<&str> {
    if value.len() < 2 {
        return None;
    }
    let first = value.chars().next()?;
    if (first == '"' || first == '\'') && value.ends_with(first) {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}
