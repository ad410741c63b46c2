//! The script checker.
//!
//! [`ScriptChecker::check`] runs every check over one script file:
//!
//! 1. Raw-text checks on the original lines (tabs, trailing spaces, legacy
//!    syntax, malformed ignore directives)
//! 2. Structural parsing, with parser issues turned into diagnostics
//! 3. Container checks against the known container types
//! 4. Event and action keys, command lines, tags and object notation
//!
//! A panic while checking one container or one command is caught at that
//! boundary and reported as `internal_exception`; the rest of the file is
//! still checked.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::args::split_command;
use super::collector::DiagnosticCollector;
use super::containers::{script_type, script_type_names, KeyKind, KeyShape, ScriptType, ALWAYS_ALLOWED};
use super::context::ScriptCheckContext;
use super::diagnostic::LintDiagnostic;
use super::event_keys::{check_action_key, check_event_key};
use super::registry::{CommandCheck, CommandRuleRegistry};
use super::rule::{RuleId, Severity};
use super::tags::check_text;
use crate::error::{Result, ScriptCheckError};
use crate::meta::model::DocumentationModel;
use crate::parse::source::PreparedSource;
use crate::parse::structure::{parse_structure, LineTrackedString, StructureIssueKind, StructureNode};

static ANCIENT_DEFS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[A-Za-z_][A-Za-z0-9_]*%").unwrap());

/// Line counts and suppression totals for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckStats {
    pub structural_lines: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    /// Diagnostics dropped by ignore directives or configuration.
    pub suppressed: usize,
}

impl std::ops::AddAssign for CheckStats {
    fn add_assign(&mut self, other: Self) {
        self.structural_lines += other.structural_lines;
        self.code_lines += other.code_lines;
        self.comment_lines += other.comment_lines;
        self.blank_lines += other.blank_lines;
        self.suppressed += other.suppressed;
    }
}

/// Everything found in one file.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub file: PathBuf,
    /// Diagnostics ordered by position; span-less ones last.
    pub diagnostics: Vec<LintDiagnostic>,
    pub stats: CheckStats,
}

impl CheckReport {
    /// Number of diagnostics with exactly this severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Diagnostics at or above `min`.
    pub fn at_least(&self, min: Severity) -> impl Iterator<Item = &LintDiagnostic> {
        self.diagnostics.iter().filter(move |d| d.severity >= min)
    }
}

/// Checks script files against a documentation model.
#[derive(Debug)]
pub struct ScriptChecker<'m> {
    model: &'m DocumentationModel,
    rules: CommandRuleRegistry,
    ignored: HashSet<String>,
}

impl<'m> ScriptChecker<'m> {
    /// Create a checker with the built-in command rules.
    pub fn new(model: &'m DocumentationModel) -> Self {
        Self {
            model,
            rules: CommandRuleRegistry::with_builtins(),
            ignored: HashSet::new(),
        }
    }

    /// Replace the command rules.
    pub fn with_rules(mut self, rules: CommandRuleRegistry) -> Self {
        self.rules = rules;
        self
    }

    /// Suppress these keys in every checked file.
    pub fn with_ignored<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored
            .extend(keys.into_iter().map(|k| k.as_ref().trim().to_lowercase()));
        self
    }

    /// Read and check a script file.
    pub fn check_file(&self, path: &Path) -> Result<CheckReport> {
        let text = std::fs::read_to_string(path).map_err(|e| ScriptCheckError::ScriptReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(self.check(path, &text))
    }

    /// Check script text. Never fails: every problem is a diagnostic.
    pub fn check(&self, file: &Path, text: &str) -> CheckReport {
        tracing::debug!(file = %file.display(), "checking script");
        let prepared = PreparedSource::new(text);
        let mut suppressed = self.ignored.clone();
        suppressed.extend(prepared.ignored_keys.iter().cloned());
        let mut collector = DiagnosticCollector::new(file, suppressed);

        check_raw_text(&prepared, &mut collector);

        let parsed = parse_structure(&prepared.cleaned);
        for issue in &parsed.issues {
            let severity = match issue.kind {
                StructureIssueKind::EmptySection => Severity::Warning,
                _ => Severity::Error,
            };
            collector.report(
                issue.kind.key(),
                severity,
                issue.line,
                issue.start,
                issue.end,
                issue.message.clone(),
            );
        }

        for (name, node) in parsed.containers() {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                Walker {
                    model: self.model,
                    rules: &self.rules,
                    collector: &mut collector,
                }
                .check_container(name, node);
            }));
            if outcome.is_err() {
                report_internal(&mut collector, name, "container");
            }
        }

        let stats = CheckStats {
            structural_lines: prepared.stats.structural_lines,
            code_lines: prepared.stats.code_lines,
            comment_lines: prepared.stats.comment_lines,
            blank_lines: prepared.stats.blank_lines,
            suppressed: collector.suppressed(),
        };
        collector.push(LintDiagnostic::new(
            RuleId::new("stat_lines"),
            Severity::Info,
            format!(
                "{} structural lines, {} code lines, {} comment lines, {} blank lines",
                stats.structural_lines, stats.code_lines, stats.comment_lines, stats.blank_lines
            ),
        ));

        let (mut diagnostics, _) = collector.finish();
        diagnostics.sort_by_key(|d| {
            let position = d.span.as_ref().map(|s| (s.start_line, s.start_col));
            (position.is_none(), position)
        });
        CheckReport {
            file: file.to_path_buf(),
            diagnostics,
            stats,
        }
    }
}

/// Commands whose nested block is a `key: value` map rather than a command list.
const MAP_BODY_COMMANDS: &[&str] = &["definemap"];

fn takes_map_body(header: &str) -> bool {
    let name = header.trim_start_matches('~');
    let name = name.split_whitespace().next().unwrap_or_default();
    MAP_BODY_COMMANDS.contains(&name)
}

fn report_internal(collector: &mut DiagnosticCollector, at: &LineTrackedString, what: &str) {
    tracing::warn!(line = at.line + 1, what, "internal error while checking");
    collector.report(
        "internal_exception",
        Severity::Error,
        at.line,
        at.start,
        at.end(),
        format!("Internal error while checking this {what}; the checker may be missing problems here"),
    );
}

fn check_raw_text(prepared: &PreparedSource, collector: &mut DiagnosticCollector) {
    if prepared.has_tabs {
        if let Some((line, column)) = prepared
            .original
            .iter()
            .enumerate()
            .find_map(|(i, l)| l.find('\t').map(|c| (i, c)))
        {
            collector.report(
                "tabs",
                Severity::MinorWarning,
                line,
                column,
                column + 1,
                "This file uses tab characters; indent with spaces",
            );
        }
    }

    for (index, line) in prepared.original.iter().enumerate() {
        let trimmed = line.trim_end_matches([' ', '\t']);
        if trimmed.len() != line.len() {
            collector.report(
                "stray_space_eol",
                Severity::MinorWarning,
                index,
                trimmed.chars().count(),
                line.chars().count(),
                "Stray whitespace at the end of the line",
            );
        }
    }

    for (index, line) in prepared.cleaned.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        if line.ends_with('{') {
            let column = line.chars().count() - 1;
            collector.report(
                "brace_syntax",
                Severity::Error,
                index,
                column,
                column + 1,
                "Braced blocks are not supported; use a ':' line and indentation",
            );
        }
        for found in ANCIENT_DEFS.find_iter(line) {
            let column = line[..found.start()].chars().count();
            collector.report(
                "ancient_defs",
                Severity::Warning,
                index,
                column,
                column + found.as_str().chars().count(),
                format!(
                    "'{}' is ancient definition syntax; use '<[{}]>'",
                    found.as_str(),
                    found.as_str().trim_matches('%')
                ),
            );
        }
        let low = line.to_lowercase();
        if let Some(position) = low.find("<def[") {
            let column = low[..position].chars().count();
            collector.report(
                "old_defs",
                Severity::MinorWarning,
                index,
                column,
                column + 5,
                "'<def[name]>' is outdated; use '<[name]>'",
            );
        }
    }

    for &line in &prepared.empty_directives {
        collector.report(
            "bad_ignore_directive",
            Severity::MinorWarning,
            line,
            0,
            prepared.original.get(line).map_or(0, |l| l.chars().count()),
            "'##ignorewarning' needs the key of the warning to ignore",
        );
    }
}

/// Walks one container. Created per container so a caught panic cannot
/// leave state behind.
struct Walker<'c, 'm> {
    model: &'m DocumentationModel,
    rules: &'c CommandRuleRegistry,
    collector: &'c mut DiagnosticCollector,
}

impl Walker<'_, '_> {
    fn check_container(&mut self, name: &LineTrackedString, node: &StructureNode) {
        tracing::debug!(container = %name.text, line = name.line + 1, "checking container");
        if name
            .low
            .chars()
            .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'))
        {
            self.collector.report(
                "bad_container_name",
                Severity::MinorWarning,
                name.line,
                name.start,
                name.end(),
                format!(
                    "Container name '{}' should only use letters, digits and underscores",
                    name.text
                ),
            );
        }

        let Some(entries) = node.as_map() else {
            self.collector.report(
                "not_a_container",
                Severity::Error,
                name.line,
                name.start,
                name.end(),
                format!("'{}' at the top level must be a container section", name.text),
            );
            return;
        };
        let Some((type_key, type_node)) = node.get("type") else {
            self.collector.report(
                "no_type_key",
                Severity::Error,
                name.line,
                name.start,
                name.end(),
                format!("Container '{}' has no 'type' key", name.text),
            );
            return;
        };
        let Some(type_value) = type_node.as_scalar() else {
            self.collector.report(
                "wrong_type",
                Severity::Error,
                type_key.line,
                type_key.start,
                type_key.end(),
                "The 'type' key must be a single value",
            );
            return;
        };
        let type_name = type_value.low.trim();
        let Some(script_type) = script_type(type_name) else {
            let known: Vec<_> = script_type_names().collect();
            self.collector.report_with_suggestion(
                "wrong_type",
                Severity::Error,
                type_value.line,
                type_value.start,
                type_value.end(),
                format!("Unknown container type '{}'", type_value.text),
                format!("Known types: {}", known.join(", ")),
            );
            return;
        };
        let slug = type_name.replace(' ', "_");

        for required in script_type.required {
            if node.get(required).is_none() {
                self.collector.report(
                    &format!("missing_key_{slug}"),
                    Severity::Warning,
                    type_key.line,
                    type_key.start,
                    type_value.end(),
                    format!("'{type_name}' container '{}' is missing required key '{required}'", name.text),
                );
            }
        }

        let mut context = ScriptCheckContext::new(type_name);
        if let Some(definitions) = node.get("definitions").and_then(|(_, n)| n.as_scalar()) {
            for definition in definitions.text.split('|') {
                let name = definition.split('[').next().unwrap_or_default();
                context.define(name);
            }
        }

        for (key, value) in entries {
            if ALWAYS_ALLOWED.contains(&key.low.as_str()) {
                continue;
            }
            if script_type.is_likely_bad(&key.low) {
                self.collector.report(
                    &format!("bad_key_{slug}"),
                    Severity::Warning,
                    key.line,
                    key.start,
                    key.end(),
                    format!("Key '{}' is almost certainly wrong in a '{type_name}' container", key.text),
                );
                continue;
            }
            match script_type.classify(&key.low) {
                Some(shape) => self.check_key(script_type, &slug, key, value, shape, &context),
                None if script_type.strict => {
                    self.collector.report(
                        &format!("unknown_key_{slug}"),
                        Severity::Warning,
                        key.line,
                        key.start,
                        key.end(),
                        format!("Key '{}' is not used by '{type_name}' containers", key.text),
                    );
                }
                None => {}
            }
        }
    }

    fn check_key(
        &mut self,
        script_type: &ScriptType,
        slug: &str,
        key: &LineTrackedString,
        value: &StructureNode,
        shape: KeyShape,
        context: &ScriptCheckContext,
    ) {
        match shape {
            KeyShape::Direct(kind) => self.check_shaped(slug, kind, key, value, context),
            KeyShape::Loose(kind) => self.check_loose(kind, value, context),
            KeyShape::SectionOf(kind) => {
                let Some(entries) = value.as_map() else {
                    self.wrong_kind(slug, key, value, &format!("a section of {}", kind.describe()));
                    return;
                };
                for (sub_key, sub_value) in entries {
                    if kind == KeyKind::Script {
                        match (script_type.name, key.low.as_str()) {
                            ("world", "events") => check_event_key(sub_key, self.model, self.collector),
                            ("assignment", "actions") => {
                                check_action_key(sub_key, self.model, self.collector)
                            }
                            _ => {}
                        }
                    }
                    self.check_shaped(slug, kind, sub_key, sub_value, context);
                }
            }
        }
    }

    fn wrong_kind(&mut self, slug: &str, key: &LineTrackedString, value: &StructureNode, expected: &str) {
        self.collector.report(
            &format!("wrong_key_kind_{slug}"),
            Severity::Warning,
            key.line,
            key.start,
            key.end(),
            format!("Key '{}' should be {expected}, but is a {}", key.text, value.kind_name()),
        );
    }

    fn check_shaped(
        &mut self,
        slug: &str,
        kind: KeyKind,
        key: &LineTrackedString,
        value: &StructureNode,
        context: &ScriptCheckContext,
    ) {
        match (kind, value) {
            (KeyKind::Value, StructureNode::Scalar(text)) => self.check_value(text, context),
            (KeyKind::List, StructureNode::List(items)) => {
                for item in items {
                    match item.as_scalar() {
                        Some(text) => self.check_value(text, context),
                        None => self.wrong_kind(slug, key, value, kind.describe()),
                    }
                }
            }
            (KeyKind::Script, StructureNode::List(items)) => {
                let mut script_context = context.clone();
                self.check_script(items, &mut script_context);
            }
            _ => self.wrong_kind(slug, key, value, kind.describe()),
        }
    }

    fn check_loose(&mut self, kind: KeyKind, value: &StructureNode, context: &ScriptCheckContext) {
        match value {
            StructureNode::Scalar(text) => self.check_value(text, context),
            StructureNode::List(items) if kind == KeyKind::Script => {
                let mut script_context = context.clone();
                self.check_script(items, &mut script_context);
            }
            StructureNode::List(items) => {
                for item in items {
                    self.check_loose(kind, item, context);
                }
            }
            StructureNode::Map(entries) => {
                for (_, inner) in entries {
                    self.check_loose(kind, inner, context);
                }
            }
        }
    }

    fn check_value(&mut self, text: &LineTrackedString, context: &ScriptCheckContext) {
        check_text(&text.text, text.line, text.start, self.model, context, self.collector);
    }

    fn check_script(&mut self, items: &[StructureNode], context: &mut ScriptCheckContext) {
        for item in items {
            match item {
                StructureNode::Scalar(entry) => self.guarded_command(entry, false, context),
                StructureNode::Map(entries) => {
                    for (header, body) in entries {
                        match body {
                            StructureNode::List(block) => {
                                self.guarded_command(header, true, context);
                                self.check_script(block, context);
                            }
                            StructureNode::Map(_) if takes_map_body(&header.low) => {
                                self.guarded_command(header, true, context);
                                self.check_loose(KeyKind::Value, body, context);
                            }
                            _ => {
                                self.collector.report(
                                    "invalid_line",
                                    Severity::Error,
                                    header.line,
                                    header.start,
                                    header.end(),
                                    format!("Command block '{}' must contain a list of commands", header.text),
                                );
                            }
                        }
                    }
                }
                StructureNode::List(_) => {}
            }
        }
    }

    fn guarded_command(&mut self, entry: &LineTrackedString, has_block: bool, context: &mut ScriptCheckContext) {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.check_command(entry, has_block, context);
        }));
        if outcome.is_err() {
            report_internal(self.collector, entry, "command");
        }
    }

    fn check_command(&mut self, entry: &LineTrackedString, has_block: bool, context: &mut ScriptCheckContext) {
        let model = self.model;
        let command = split_command(entry);
        tracing::debug!(command = %command.name, line = entry.line + 1, "checking command");
        let line = entry.line;
        if command.name.is_empty() {
            self.collector.report(
                "empty_command",
                Severity::Error,
                line,
                entry.start,
                entry.end(),
                "Empty command entry",
            );
            return;
        }

        if let Some(column) = command.unclosed_quote {
            self.collector.report(
                "bad_quotes",
                Severity::Warning,
                line,
                column,
                entry.end(),
                "Quote is never closed (a closing quote must be followed by a space or the end of the line)",
            );
        }
        for arg in &command.args {
            if arg.quoted
                && Some(arg.start) != command.unclosed_quote
                && !arg.text.is_empty()
                && !arg.text.contains(' ')
            {
                self.collector.report(
                    "pointless_quotes",
                    Severity::MinorWarning,
                    line,
                    arg.start,
                    arg.end,
                    format!("Quotes around '{}' are not needed", arg.text),
                );
            }
        }

        let globals = model.command_global_switches();
        if model.command_count() > 0 {
            let name_end = command.name_start + command.name.chars().count();
            match model.command(&command.name) {
                None => {
                    self.collector.report(
                        "unknown_command",
                        Severity::Error,
                        line,
                        command.name_start,
                        name_end,
                        format!("Unknown command '{}'", command.name),
                    );
                }
                Some(meta) => {
                    if let Some(reason) = &meta.deprecated {
                        self.collector.report(
                            "deprecated_command",
                            Severity::Warning,
                            line,
                            command.name_start,
                            name_end,
                            format!("Command '{}' is deprecated: {reason}", command.name),
                        );
                    }
                    let counted = command
                        .args
                        .iter()
                        .filter(|arg| !arg.switch().is_some_and(|(prefix, _)| globals.contains(&prefix)))
                        .count();
                    if counted < meta.required {
                        self.collector.report(
                            "too_few_args",
                            Severity::Error,
                            line,
                            entry.start,
                            entry.end(),
                            format!(
                                "'{}' needs at least {} argument(s), found {counted}",
                                command.name, meta.required
                            ),
                        );
                    }
                    if let Some(maximum) = meta.maximum.filter(|max| counted > *max) {
                        self.collector.report(
                            "too_many_args",
                            Severity::Error,
                            line,
                            entry.start,
                            entry.end(),
                            format!(
                                "'{}' takes at most {maximum} argument(s), found {counted}",
                                command.name
                            ),
                        );
                    }
                    if !meta.switches.is_empty() {
                        for arg in command.args.iter().filter(|a| !a.quoted) {
                            let Some((prefix, _)) = arg.switch() else {
                                continue;
                            };
                            if !meta.switches.contains(&prefix)
                                && !globals.contains(&prefix)
                                && !model.is_data_value(&arg.text.to_lowercase())
                            {
                                self.collector.report(
                                    "bad_switch",
                                    Severity::Warning,
                                    line,
                                    arg.start,
                                    arg.end,
                                    format!("'{prefix}:' is not a switch of '{}'", command.name),
                                );
                            }
                        }
                    }
                }
            }
        }

        for arg in &command.args {
            match arg.switch() {
                Some((prefix, value)) if prefix == "save" => context.save(value),
                _ => {}
            }
        }

        let mut check = CommandCheck {
            model,
            command: &command,
            line,
            line_end: entry.end(),
            has_block,
            context: &mut *context,
            collector: &mut *self.collector,
        };
        self.rules.run(&mut check);

        for arg in &command.args {
            check_text(&arg.text, line, arg.text_start(), model, context, self.collector);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> CheckReport {
        let model = DocumentationModel::empty();
        ScriptChecker::new(&model).check(Path::new("test.dsc"), text)
    }

    fn keys(report: &CheckReport) -> Vec<&str> {
        report
            .diagnostics
            .iter()
            .filter(|d| d.severity > Severity::Info)
            .map(|d| d.rule_id.as_str())
            .collect()
    }

    #[test]
    fn missing_required_key_is_one_warning_at_type_line() {
        let report = check("mytask:\n    type: task");
        let found: Vec<_> = report.at_least(Severity::MinorWarning).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule_id.as_str(), "missing_key_task");
        assert_eq!(found[0].severity, Severity::Warning);
        assert_eq!(found[0].line(), Some(2));
    }

    #[test]
    fn clean_task_has_no_problems() {
        let report = check("my_task:\n    type: task\n    script:\n    - narrate hello\n");
        assert!(keys(&report).is_empty(), "{:?}", report.diagnostics);
        assert_eq!(report.stats.code_lines, 1);
    }

    #[test]
    fn statistics_are_reported_as_info() {
        let report = check("a:\n    type: data\n# note\n");
        let stat = report.diagnostics.last().unwrap();
        assert_eq!(stat.rule_id.as_str(), "stat_lines");
        assert_eq!(stat.severity, Severity::Info);
        assert!(stat.span.is_none());
        assert_eq!(report.stats.comment_lines, 1);
    }

    #[test]
    fn container_shape_problems() {
        assert_eq!(keys(&check("name: value")), ["not_a_container"]);
        assert_eq!(keys(&check("thing:\n    script:\n    - narrate x")), ["no_type_key"]);
        assert_eq!(keys(&check("thing:\n    type: nonsense")), ["wrong_type"]);
        assert_eq!(
            keys(&check("Bad-Name:\n    type: data")),
            ["bad_container_name"]
        );
    }

    #[test]
    fn likely_bad_and_unknown_keys() {
        let report = check("b:\n    type: book\n    title: t\n    author: a\n    text:\n    - page\n    events: x\n    colour: red\n");
        assert_eq!(keys(&report), ["bad_key_book", "unknown_key_book"]);
    }

    #[test]
    fn wrong_key_kind_is_reported() {
        let report = check("t:\n    type: task\n    script: narrate hi\n");
        assert_eq!(keys(&report), ["wrong_key_kind_task"]);
    }

    #[test]
    fn raw_text_checks() {
        let report = check("t:   \n    type: task\n    script:\n    - narrate %old%\n    - narrate <def[x]>\n##ignorewarning\n");
        let found = keys(&report);
        assert!(found.contains(&"stray_space_eol"));
        assert!(found.contains(&"ancient_defs"));
        assert!(found.contains(&"old_defs"));
        assert!(found.contains(&"bad_ignore_directive"));
    }

    #[test]
    fn brace_blocks_are_errors() {
        let report = check("t:\n    type: task\n    script:\n    - if true {\n");
        assert!(keys(&report).contains(&"brace_syntax"));
    }

    #[test]
    fn tabs_are_reported_once() {
        let report = check("t:\n\ttype: task\n\tscript:\n\t- narrate a\n");
        assert_eq!(keys(&report).iter().filter(|k| **k == "tabs").count(), 1);
    }

    #[test]
    fn definitions_key_and_define_register_names() {
        let report = check(
            "t:\n    type: task\n    definitions: target|amount[How many]\n    script:\n    - narrate <[target]> <[amount]>\n    - define extra 1\n    - narrate <[extra]> <[nope]>\n",
        );
        assert_eq!(keys(&report), ["def_of_nothing"]);
        assert_eq!(report.diagnostics[0].line(), Some(7));
    }

    #[test]
    fn nested_blocks_share_the_context() {
        let report = check(
            "t:\n    type: task\n    script:\n    - foreach <list[a|b]> as:letter:\n        - define last <[letter]>\n    - narrate <[last]> <[loop_index]>\n",
        );
        assert!(keys(&report).is_empty(), "{:?}", report.diagnostics);
    }

    #[test]
    fn definemap_blocks_take_a_map_body() {
        let report = check(
            "t:\n    type: task\n    script:\n    - definemap data:\n        a: 1\n        b: <[other]>\n    - narrate <[data]>\n",
        );
        assert_eq!(keys(&report), ["def_of_nothing"]);
        assert_eq!(report.diagnostics[0].line(), Some(6));

        let report = check("t:\n    type: task\n    script:\n    - narrate data:\n        a: 1\n");
        assert_eq!(keys(&report), ["invalid_line"]);
    }

    #[test]
    fn saves_register_entries() {
        let report = check(
            "t:\n    type: task\n    script:\n    - spawn zombie save:mob\n    - narrate <entry[mob].spawned_entity> <entry[other]>\n",
        );
        assert_eq!(keys(&report), ["entry_of_nothing"]);
    }

    #[test]
    fn quote_checks() {
        let report = check("t:\n    type: task\n    script:\n    - narrate \"single\"\n    - narrate \"two words\"\n    - narrate \"broken\n");
        assert_eq!(keys(&report), ["pointless_quotes", "bad_quotes"]);
    }

    #[test]
    fn ignore_directive_suppresses_and_counts() {
        let report = check("##ignorewarning stray_space_eol\nt:  \n    type: task\n    script:\n    - narrate a  \n");
        assert!(keys(&report).is_empty());
        assert_eq!(report.stats.suppressed, 2);
    }

    #[test]
    fn configured_ignores_apply_to_every_file() {
        let model = DocumentationModel::empty();
        let checker = ScriptChecker::new(&model).with_ignored(["missing_key_task"]);
        let report = checker.check(Path::new("a.dsc"), "mytask:\n    type: task");
        assert!(keys(&report).is_empty());
        assert_eq!(report.stats.suppressed, 1);
    }

    #[test]
    fn determine_outside_procedures_is_pointless() {
        let report = check("t:\n    type: task\n    script:\n    - determine 3\n");
        assert_eq!(keys(&report), ["pointless_determine"]);
    }

    #[test]
    fn sibling_containers_are_all_checked() {
        let report = check("a:\n    type: task\nb:\n    type: procedure\n");
        assert_eq!(keys(&report), ["missing_key_task", "missing_key_procedure"]);
    }
}
