//! Tag and object-notation checks for argument and value text.
//!
//! [`find_tags`] locates `<...>` tags in a piece of text. It tolerates the
//! literal operators scripts use in comparisons (`<`, `<=`, `<-`, `<<`)
//! and ignores a `>` that sits inside a tag's bracket parameter.
//! [`check_text`] lexes and traces every tag it finds, recursing into
//! parameters and fallbacks, and flags raw object notation.

use std::sync::LazyLock;

use regex::Regex;

use super::args::opens_tag;
use super::collector::DiagnosticCollector;
use super::context::ScriptCheckContext;
use super::rule::Severity;
use crate::analysis::tracer::{trace_tag, TraceErrorKind};
use crate::meta::model::DocumentationModel;
use crate::parse::tag::parse_tag;

static OBJECT_NOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[^a-z0-9])([bcdeilmnpqstuw])@").unwrap());

/// A tag located in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundTag {
    /// Text between the angle brackets.
    pub text: String,
    /// Char offset of the first char after `<`.
    pub start: usize,
    /// Char offset of the closing `>`.
    pub end: usize,
}

/// Result of scanning text for tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagScan {
    /// Outermost tags, in order.
    pub tags: Vec<FoundTag>,
    /// Char offset of a `<` that was never closed.
    pub unclosed: Option<usize>,
}

/// Find the outermost tags in `text`.
pub fn find_tags(text: &str) -> TagScan {
    let chars: Vec<char> = text.chars().collect();
    let mut scan = TagScan::default();
    // Bracket depth recorded at each open tag.
    let mut open: Vec<usize> = Vec::new();
    let mut brackets = 0usize;
    let mut outer_start = 0;

    for (i, c) in chars.iter().enumerate() {
        match c {
            '<' if opens_tag(&chars, i) => {
                if open.is_empty() {
                    outer_start = i + 1;
                    brackets = 0;
                }
                open.push(brackets);
            }
            '[' if !open.is_empty() => brackets += 1,
            ']' if !open.is_empty() => brackets = brackets.saturating_sub(1),
            '>' if open.last() == Some(&brackets) => {
                open.pop();
                if open.is_empty() {
                    scan.tags.push(FoundTag {
                        text: chars[outer_start..i].iter().collect(),
                        start: outer_start,
                        end: i,
                    });
                }
            }
            _ => {}
        }
    }
    if !open.is_empty() {
        scan.unclosed = Some(outer_start - 1);
    }
    scan
}

/// Check every tag and object-notation use in a piece of text.
///
/// `line` and `column` locate the first char of `text` (0-indexed).
pub fn check_text(
    text: &str,
    line: usize,
    column: usize,
    model: &DocumentationModel,
    context: &ScriptCheckContext,
    collector: &mut DiagnosticCollector,
) {
    scan_tags(text, line, column, model, context, collector);
    check_object_notation(text, line, column, collector);
}

fn scan_tags(
    text: &str,
    line: usize,
    column: usize,
    model: &DocumentationModel,
    context: &ScriptCheckContext,
    collector: &mut DiagnosticCollector,
) {
    if !text.contains('<') {
        return;
    }
    let scan = find_tags(text);
    if let Some(offset) = scan.unclosed {
        collector.report(
            "unclosed_tag",
            Severity::Warning,
            line,
            column + offset,
            column + text.chars().count(),
            "Tag is opened with '<' but never closed",
        );
    }
    for tag in &scan.tags {
        check_tag(tag, line, column, model, context, collector);
    }
}

fn check_tag(
    tag: &FoundTag,
    line: usize,
    column: usize,
    model: &DocumentationModel,
    context: &ScriptCheckContext,
    collector: &mut DiagnosticCollector,
) {
    let start = column + tag.start;
    if tag.text.trim().is_empty() {
        collector.report(
            "empty_tag",
            Severity::Error,
            line,
            start - 1,
            column + tag.end + 1,
            "Empty tag '<>'",
        );
        return;
    }

    let lowered = tag.text.to_lowercase();
    let parsed = parse_tag(&lowered, |err| {
        collector.report(
            "tag_format",
            Severity::Error,
            line,
            start + err.offset(),
            start + err.offset() + 1,
            format!("Malformed tag '<{}>': {err}", tag.text),
        );
    });

    if let Some(first) = parsed.parts.first() {
        if let Some(name) = first.parameter.as_deref().filter(|n| !n.contains('<')) {
            match first.text.as_str() {
                "" | "def" | "definition" if !context.knows_definition(name) => {
                    collector.report(
                        "def_of_nothing",
                        Severity::Warning,
                        line,
                        start,
                        column + tag.end,
                        format!("Definition '{name}' is read here but never defined"),
                    );
                }
                "entry" if !context.knows_save(name) => {
                    collector.report(
                        "entry_of_nothing",
                        Severity::Warning,
                        line,
                        start,
                        column + tag.end,
                        format!("Save entry '{name}' is read here but never saved"),
                    );
                }
                _ => {}
            }
        }
    }

    if model.tag_count() > 0 {
        trace_tag(&parsed, model, |err| {
            let key = match err.kind {
                TraceErrorKind::BadBase => "bad_tag_base",
                TraceErrorKind::BadPart => "bad_tag_part",
                TraceErrorKind::ParamRequired => "tag_param_required",
                TraceErrorKind::ParamForbidden => "tag_param_forbidden",
                TraceErrorKind::Deprecated => "deprecated_tag",
            };
            let (part_start, part_end) = parsed
                .parts
                .get(err.part_index)
                .map(|p| (p.start, p.end))
                .unwrap_or((0, tag.end - tag.start));
            collector.report(
                key,
                Severity::Warning,
                line,
                start + part_start,
                start + part_end,
                err.message,
            );
        });
    }

    for part in &parsed.parts {
        if let Some(param) = part.parameter.as_deref().filter(|p| p.contains('<')) {
            let offset = part.start + part.text.chars().count() + 1;
            scan_tags(param, line, start + offset, model, context, collector);
        }
    }
    if let Some(fallback) = parsed.fallback.as_deref().filter(|f| f.contains('<')) {
        let offset = lowered.chars().count() - fallback.chars().count();
        scan_tags(fallback, line, start + offset, model, context, collector);
    }
}

fn check_object_notation(
    text: &str,
    line: usize,
    column: usize,
    collector: &mut DiagnosticCollector,
) {
    for caps in OBJECT_NOTATION.captures_iter(text) {
        let Some(found) = caps.get(1) else {
            continue;
        };
        let offset = text[..found.start()].chars().count();
        let notation = &text[found.start()..found.end() + 1];
        collector.report(
            "raw_object_notation",
            Severity::Warning,
            line,
            column + offset,
            column + offset + 2,
            format!("Raw object notation '{notation}' is not reliable; use a tag or a plain value"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::diagnostic::LintDiagnostic;
    use crate::meta::loader::{parse_meta_text, LoadedSources};
    use crate::meta::ModelBuilder;

    fn tag_texts(text: &str) -> Vec<String> {
        find_tags(text).tags.into_iter().map(|t| t.text).collect()
    }

    fn run(text: &str, model: &DocumentationModel, ctx: &ScriptCheckContext) -> Vec<LintDiagnostic> {
        let mut collector = DiagnosticCollector::new("t.dsc", Default::default());
        check_text(text, 0, 0, model, ctx, &mut collector);
        collector.finish().0
    }

    fn keys(diagnostics: &[LintDiagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.rule_id.as_str()).collect()
    }

    const DOCS: &str = r#"
<--[objecttype]
@name ObjectTag
-->
<--[objecttype]
@name ElementTag
@base ObjectTag
-->
<--[objecttype]
@name PlayerTag
@base ObjectTag
-->
<--[tag]
@attribute <player>
@returns PlayerTag
-->
<--[tag]
@attribute <PlayerTag.name>
@returns ElementTag
-->
"#;

    fn small_model() -> DocumentationModel {
        let mut sources = LoadedSources::default();
        parse_meta_text(DOCS, "docs", &mut sources);
        ModelBuilder::from_sources(sources).build()
    }

    #[test]
    fn finds_outermost_tags() {
        assert_eq!(tag_texts("a <player.name> b <[x]>"), ["player.name", "[x]"]);
        assert_eq!(tag_texts("<list[<[a]>|<[b]>].size>"), ["list[<[a]>|<[b]>].size"]);
    }

    #[test]
    fn tolerates_comparison_operators() {
        assert!(tag_texts("<[a]> < 3").len() == 1);
        assert!(tag_texts("x <= 2 <- arrow").is_empty());
        assert!(find_tags("a << b").unclosed.is_none());
    }

    #[test]
    fn bracketed_close_does_not_end_tag() {
        assert_eq!(tag_texts("<[a].is[>].than[3]>"), ["[a].is[>].than[3]"]);
    }

    #[test]
    fn reports_unclosed_tag() {
        let scan = find_tags("hello <player.name");
        assert_eq!(scan.unclosed, Some(6));
        let diags = run("hello <player.name", &DocumentationModel::empty(), &ScriptCheckContext::default());
        assert_eq!(keys(&diags), ["unclosed_tag"]);
    }

    #[test]
    fn empty_tag_is_an_error() {
        let diags = run("a <> b", &DocumentationModel::empty(), &ScriptCheckContext::default());
        assert_eq!(keys(&diags), ["empty_tag"]);
        let diags = run("< x <  >", &DocumentationModel::empty(), &ScriptCheckContext::default());
        assert!(diags.is_empty());
    }

    #[test]
    fn unknown_definitions_are_reported() {
        let mut ctx = ScriptCheckContext::new("task");
        ctx.define("known");
        let diags = run("<[known]> <[unknown]>", &DocumentationModel::empty(), &ctx);
        assert_eq!(keys(&diags), ["def_of_nothing"]);
        assert!(diags[0].message.contains("unknown"));
        assert_eq!(diags[0].span.as_ref().unwrap().start_col, 12);
    }

    #[test]
    fn unknowable_context_skips_definition_checks() {
        let mut ctx = ScriptCheckContext::new("task");
        ctx.defs_unknowable = true;
        ctx.saves_unknowable = true;
        let diags = run("<[a]> <entry[b]>", &DocumentationModel::empty(), &ctx);
        assert!(diags.is_empty());
    }

    #[test]
    fn unknown_saves_are_reported() {
        let diags = run("<entry[spawned].entity>", &DocumentationModel::empty(), &ScriptCheckContext::default());
        assert_eq!(keys(&diags), ["entry_of_nothing"]);
    }

    #[test]
    fn malformed_tags_are_reported() {
        let diags = run("<player.name]>", &DocumentationModel::empty(), &ScriptCheckContext::default());
        assert_eq!(keys(&diags), ["tag_format"]);
    }

    #[test]
    fn traces_tags_against_the_model() {
        let model = small_model();
        let ctx = ScriptCheckContext::default();
        assert!(run("<player.name>", &model, &ctx).is_empty());
        assert_eq!(keys(&run("<player.nmae>", &model, &ctx)), ["bad_tag_part"]);
        assert_eq!(keys(&run("<plaer.name>", &model, &ctx)), ["bad_tag_base"]);
    }

    #[test]
    fn nested_tags_are_checked() {
        let model = small_model();
        let ctx = ScriptCheckContext::default();
        let diags = run("<[list].get[<[missing]>]||<plaer>>", &model, &ctx);
        let found = keys(&diags);
        assert!(found.contains(&"def_of_nothing"));
        assert!(found.contains(&"bad_tag_base"));
    }

    #[test]
    fn raw_object_notation_is_flagged() {
        let diags = run("p@bob and l@1,2,3", &DocumentationModel::empty(), &ScriptCheckContext::default());
        assert_eq!(keys(&diags), ["raw_object_notation"]);
        let diags = run("mail me@example.com", &DocumentationModel::empty(), &ScriptCheckContext::default());
        assert!(diags.is_empty());
    }
}
