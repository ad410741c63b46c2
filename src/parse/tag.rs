//! Tag expression lexing.
//!
//! A tag expression is the text between `<` and `>` in a script, such as
//! `player.inventory.slot[5].material.name||air`. Parsing splits it into
//! dotted [`TagPart`]s, each with an optional bracket parameter, plus an
//! optional fallback after `||`.
//!
//! The lexer never fails: malformed input is reported through a callback
//! and the best-effort result is still returned.
//!
//! # Example
//!
//! ```
//! use scriptcheck::parse::tag::parse_tag;
//!
//! let tag = parse_tag("util.random.int[1].to[5]||0", |_| {});
//! assert_eq!(tag.parts.len(), 4);
//! assert_eq!(tag.parts[2].parameter.as_deref(), Some("1"));
//! assert_eq!(tag.fallback.as_deref(), Some("0"));
//! ```

use thiserror::Error;

/// A syntax problem found while lexing a tag.
///
/// Offsets are character offsets into the tag text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagSyntaxError {
    /// A `]` without a matching `[`.
    #[error("Tag has an unmatched ']' at position {offset}")]
    UnmatchedClose { offset: usize },

    /// A `[` that is never closed.
    #[error("Tag has an unclosed '[' opened at position {offset}")]
    UnclosedBracket { offset: usize },

    /// Text between a parameter's `]` and the next `.`.
    #[error("Tag has text after a parameter at position {offset} (expected '.')")]
    TextAfterParameter { offset: usize },
}

impl TagSyntaxError {
    /// Character offset the error points at.
    pub fn offset(&self) -> usize {
        match self {
            TagSyntaxError::UnmatchedClose { offset }
            | TagSyntaxError::UnclosedBracket { offset }
            | TagSyntaxError::TextAfterParameter { offset } => *offset,
        }
    }
}

/// One dotted segment of a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPart {
    /// Segment text without its parameter.
    pub text: String,
    /// Text inside the outermost brackets, if any.
    pub parameter: Option<String>,
    /// Start offset (chars, inclusive).
    pub start: usize,
    /// End offset (chars, exclusive).
    pub end: usize,
}

/// A lexed tag expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedTag {
    /// The original tag text.
    pub raw: String,
    /// Dotted parts in order.
    pub parts: Vec<TagPart>,
    /// Text after `||`, if present.
    pub fallback: Option<String>,
    /// Start offset of the whole tag (chars).
    pub start: usize,
    /// End offset of the parsed parts (chars, exclusive; excludes the fallback).
    pub end: usize,
}

impl ParsedTag {
    /// Rebuild `base[param].part||fallback` from the lexed parts.
    pub fn to_normalized_string(&self) -> String {
        let mut out = self
            .parts
            .iter()
            .map(|p| match &p.parameter {
                Some(param) => format!("{}[{}]", p.text, param),
                None => p.text.clone(),
            })
            .collect::<Vec<_>>()
            .join(".");
        if let Some(fallback) = &self.fallback {
            out.push_str("||");
            out.push_str(fallback);
        }
        out
    }

    /// The dotted part names without parameters, e.g. `player.name`.
    pub fn dotted_name(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

struct PartBuilder {
    start: usize,
    bracket_open: Option<usize>,
    bracket_close: Option<usize>,
    reported_trailing: bool,
}

impl PartBuilder {
    fn new(start: usize) -> Self {
        Self {
            start,
            bracket_open: None,
            bracket_close: None,
            reported_trailing: false,
        }
    }

    fn finish(&self, chars: &[char], end: usize) -> TagPart {
        let text_end = self.bracket_open.unwrap_or(end);
        let text = chars[self.start..text_end].iter().collect();
        let parameter = self.bracket_open.map(|open| {
            let close = self.bracket_close.unwrap_or(end);
            chars[open + 1..close].iter().collect()
        });
        TagPart {
            text,
            parameter,
            start: self.start,
            end,
        }
    }
}

/// Lex a tag expression.
///
/// Problems are passed to `on_error`; lexing always completes.
pub fn parse_tag(text: &str, mut on_error: impl FnMut(TagSyntaxError)) -> ParsedTag {
    let chars: Vec<char> = text.chars().collect();
    let mut tag = ParsedTag {
        raw: text.to_string(),
        start: 0,
        end: chars.len(),
        ..Default::default()
    };
    if chars.is_empty() {
        return tag;
    }

    let mut depth = 0usize;
    let mut part = PartBuilder::new(0);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '[' => {
                if depth == 0 {
                    if part.bracket_close.is_some() {
                        report_trailing(&mut part, i, &mut on_error);
                    } else if part.bracket_open.is_none() {
                        part.bracket_open = Some(i);
                    }
                }
                depth += 1;
            }
            ']' => {
                if depth == 0 {
                    on_error(TagSyntaxError::UnmatchedClose { offset: i });
                } else {
                    depth -= 1;
                    if depth == 0 && part.bracket_close.is_none() && part.bracket_open.is_some() {
                        part.bracket_close = Some(i);
                    }
                }
            }
            '.' if depth == 0 => {
                tag.parts.push(part.finish(&chars, i));
                part = PartBuilder::new(i + 1);
            }
            '|' if depth == 0 && chars.get(i + 1) == Some(&'|') => {
                tag.parts.push(part.finish(&chars, i));
                tag.end = i;
                tag.fallback = Some(chars[i + 2..].iter().collect());
                return tag;
            }
            _ => {
                if depth == 0 && part.bracket_close.is_some() {
                    report_trailing(&mut part, i, &mut on_error);
                }
            }
        }
        i += 1;
    }

    if depth > 0 {
        on_error(TagSyntaxError::UnclosedBracket {
            offset: part.bracket_open.unwrap_or(part.start),
        });
    }
    tag.parts.push(part.finish(&chars, chars.len()));
    tag
}

fn report_trailing(
    part: &mut PartBuilder,
    offset: usize,
    on_error: &mut impl FnMut(TagSyntaxError),
) {
    if !part.reported_trailing {
        part.reported_trailing = true;
        on_error(TagSyntaxError::TextAfterParameter { offset });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse_ok(text: &str) -> ParsedTag {
        let mut errors = Vec::new();
        let tag = parse_tag(text, |e| errors.push(e));
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        tag
    }

    #[test]
    fn splits_dotted_parts() {
        let tag = parse_ok("player.location.world.name");
        let names: Vec<_> = tag.parts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(names, ["player", "location", "world", "name"]);
        assert!(tag.fallback.is_none());
    }

    #[test]
    fn captures_parameters_and_spans() {
        let tag = parse_ok("list[a|b].get[1]");
        assert_eq!(tag.parts[0].text, "list");
        assert_eq!(tag.parts[0].parameter.as_deref(), Some("a|b"));
        assert_eq!((tag.parts[0].start, tag.parts[0].end), (0, 9));
        assert_eq!(tag.parts[1].text, "get");
        assert_eq!(tag.parts[1].parameter.as_deref(), Some("1"));
        assert_eq!((tag.parts[1].start, tag.parts[1].end), (10, 16));
    }

    #[test]
    fn nested_brackets_stay_in_outer_parameter() {
        let tag = parse_ok("list[<[a].get[1]>].size");
        assert_eq!(tag.parts.len(), 2);
        assert_eq!(tag.parts[0].parameter.as_deref(), Some("<[a].get[1]>"));
    }

    #[test]
    fn dots_inside_parameters_do_not_split() {
        let tag = parse_ok("element[1.5].round");
        assert_eq!(tag.parts.len(), 2);
        assert_eq!(tag.parts[0].parameter.as_deref(), Some("1.5"));
    }

    #[test]
    fn definition_shorthand_has_empty_base() {
        let tag = parse_ok("[target].name");
        assert_eq!(tag.parts[0].text, "");
        assert_eq!(tag.parts[0].parameter.as_deref(), Some("target"));
    }

    #[test]
    fn fallback_stops_parsing() {
        let tag = parse_ok("name[x]||backup.with[brackets].and.dots");
        assert_eq!(tag.parts.len(), 1);
        assert_eq!(tag.parts[0].parameter.as_deref(), Some("x"));
        assert_eq!(tag.fallback.as_deref(), Some("backup.with[brackets].and.dots"));
    }

    #[test]
    fn single_pipe_is_not_a_fallback() {
        let tag = parse_ok("list[a|b]");
        assert!(tag.fallback.is_none());
    }

    #[test]
    fn reports_unmatched_close() {
        let mut errors = Vec::new();
        let tag = parse_tag("player].name", |e| errors.push(e));
        assert_eq!(errors, vec![TagSyntaxError::UnmatchedClose { offset: 6 }]);
        assert_eq!(tag.parts.len(), 2);
    }

    #[test]
    fn reports_unclosed_bracket() {
        let mut errors = Vec::new();
        let tag = parse_tag("player.flag[test", |e| errors.push(e));
        assert_eq!(errors, vec![TagSyntaxError::UnclosedBracket { offset: 11 }]);
        assert_eq!(tag.parts[1].parameter.as_deref(), Some("test"));
    }

    #[test]
    fn reports_text_after_parameter_once() {
        let mut errors = Vec::new();
        let tag = parse_tag("player.flag[a]bc.name", |e| errors.push(e));
        assert_eq!(errors, vec![TagSyntaxError::TextAfterParameter { offset: 14 }]);
        assert_eq!(tag.parts.len(), 3);
    }

    #[test]
    fn empty_input_has_no_parts() {
        let tag = parse_ok("");
        assert!(tag.parts.is_empty());
    }

    #[test]
    fn dotted_name_drops_parameters() {
        let tag = parse_ok("util.random.int[1].to[3]");
        assert_eq!(tag.dotted_name(), "util.random.int.to");
    }

    fn part_strategy() -> impl Strategy<Value = String> {
        ("[a-z_]{1,8}", proptest::option::of("[a-z0-9 ]{0,6}")).prop_map(|(name, param)| match param {
            Some(p) => format!("{}[{}]", name, p),
            None => name,
        })
    }

    proptest! {
        #[test]
        fn round_trip_reconstructs_input(parts in proptest::collection::vec(part_strategy(), 1..6)) {
            let input = parts.join(".");
            let mut errors = Vec::new();
            let tag = parse_tag(&input, |e| errors.push(e));
            prop_assert!(errors.is_empty());
            prop_assert_eq!(tag.parts.len(), parts.len());
            prop_assert_eq!(tag.to_normalized_string(), input);
        }

        #[test]
        fn spans_are_monotonic_and_in_bounds(input in "[a-z\\[\\]\\.|]{1,24}") {
            let tag = parse_tag(&input, |_| {});
            let len = input.chars().count();
            prop_assert!(!tag.parts.is_empty());
            let mut last_end = 0;
            for part in &tag.parts {
                prop_assert!(part.start >= last_end);
                prop_assert!(part.start <= part.end);
                prop_assert!(part.end <= len);
                last_end = part.end;
            }
        }
    }
}
