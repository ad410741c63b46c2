//! Advanced matcher compilation.
//!
//! Script authors write match patterns such as `stone`, `*_log`,
//! `diamond_*|gold_*`, `regex:.+_ore` or `!air`. This module compiles
//! those strings into [`MatchPredicate`] values that can be evaluated
//! against many words without re-parsing.
//!
//! # Precedence
//!
//! 1. A leading `!` negates the compiled remainder
//! 2. `regex:` makes the remainder a case-insensitive regular expression
//! 3. Any `|` splits into alternatives (one level only)
//! 4. Any `*` makes a wildcard pattern
//! 5. Otherwise the pattern is an exact, case-insensitive literal
//!
//! # Example
//!
//! ```
//! use scriptcheck::parse::pattern::compile;
//!
//! let matcher = compile("*_log|stone").unwrap();
//! assert!(matcher.matches("OAK_LOG"));
//! assert!(matcher.matches("stone"));
//! assert!(!matcher.matches("cobblestone"));
//! ```

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Error produced when a matcher cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The `regex:` body is not a valid regular expression.
    #[error("Invalid regex matcher '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },
}

/// A compiled matcher predicate.
///
/// Literal text is stored lowercased; inputs are lowercased before comparison.
#[derive(Debug, Clone)]
pub enum MatchPredicate {
    /// Matches every input (`*`).
    AlwaysTrue,
    /// Exact literal equality.
    Exact(String),
    /// `text*`
    Prefix(String),
    /// `*text`
    Suffix(String),
    /// `a*b*c`: segments in order, anchored at both ends.
    Segments(Vec<String>),
    /// `regex:...`, anchored to the whole input.
    Regex(Regex),
    /// `a|b|c`
    AnyOf(Vec<MatchPredicate>),
    /// `!inner`
    Not(Box<MatchPredicate>),
}

impl MatchPredicate {
    /// Test a word against this predicate.
    pub fn matches(&self, word: &str) -> bool {
        let lowered = word.to_lowercase();
        self.matches_lowered(&lowered)
    }

    fn matches_lowered(&self, word: &str) -> bool {
        match self {
            MatchPredicate::AlwaysTrue => true,
            MatchPredicate::Exact(text) => word == text,
            MatchPredicate::Prefix(prefix) => word.starts_with(prefix.as_str()),
            MatchPredicate::Suffix(suffix) => word.ends_with(suffix.as_str()),
            MatchPredicate::Segments(segments) => matches_segments(word, segments),
            MatchPredicate::Regex(regex) => regex.is_match(word),
            MatchPredicate::AnyOf(options) => options.iter().any(|o| o.matches_lowered(word)),
            MatchPredicate::Not(inner) => !inner.matches_lowered(word),
        }
    }

    /// Whether this predicate is a plain literal.
    pub fn is_exact(&self) -> bool {
        matches!(self, MatchPredicate::Exact(_))
    }
}

/// Whether a matcher string needs the advanced compiler rather than a plain
/// literal comparison.
pub fn is_advanced(pattern: &str) -> bool {
    pattern.starts_with("regex:")
        || pattern.starts_with('!')
        || pattern.contains('|')
        || pattern.contains('*')
}

/// Compile a matcher string into a predicate.
///
/// # Errors
///
/// Returns [`PatternError::InvalidRegex`] if a `regex:` body fails to compile.
pub fn compile(pattern: &str) -> Result<MatchPredicate, PatternError> {
    if let Some(rest) = pattern.strip_prefix('!') {
        return Ok(MatchPredicate::Not(Box::new(compile(rest)?)));
    }
    if let Some(rest) = pattern.strip_prefix("regex:") {
        return compile_regex(rest);
    }
    if pattern.contains('|') {
        let options = pattern
            .split('|')
            .map(compile)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(MatchPredicate::AnyOf(options));
    }
    let lowered = pattern.to_lowercase();
    if lowered.contains('*') {
        return Ok(compile_wildcard(&lowered));
    }
    Ok(MatchPredicate::Exact(lowered))
}

fn compile_regex(body: &str) -> Result<MatchPredicate, PatternError> {
    RegexBuilder::new(&format!("^(?:{})$", body))
        .case_insensitive(true)
        .build()
        .map(MatchPredicate::Regex)
        .map_err(|e| PatternError::InvalidRegex {
            pattern: body.to_string(),
            message: e.to_string(),
        })
}

fn compile_wildcard(pattern: &str) -> MatchPredicate {
    if pattern == "*" {
        return MatchPredicate::AlwaysTrue;
    }
    let segments: Vec<String> = pattern.split('*').map(str::to_string).collect();
    match segments.as_slice() {
        [prefix, suffix] if suffix.is_empty() => MatchPredicate::Prefix(prefix.clone()),
        [prefix, suffix] if prefix.is_empty() => MatchPredicate::Suffix(suffix.clone()),
        _ => MatchPredicate::Segments(segments),
    }
}

/// Forward, non-overlapping search for each segment; the first segment must
/// be a prefix and the last a suffix.
fn matches_segments(word: &str, segments: &[String]) -> bool {
    let (first, last) = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) if segments.len() >= 2 => (first, last),
        _ => return segments.first().is_some_and(|s| s == word),
    };
    if !word.starts_with(first.as_str()) {
        return false;
    }
    let mut position = first.len();
    for segment in &segments[1..segments.len() - 1] {
        match word[position..].find(segment.as_str()) {
            Some(found) => position += found + segment.len(),
            None => return false,
        }
    }
    word.len() >= position + last.len() && word.ends_with(last.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_literal_is_exact_and_case_insensitive() {
        let m = compile("Stone").unwrap();
        assert!(m.is_exact());
        assert!(m.matches("stone"));
        assert!(m.matches("STONE"));
        assert!(!m.matches("stones"));
    }

    #[test]
    fn lone_star_matches_everything() {
        let m = compile("*").unwrap();
        assert!(matches!(m, MatchPredicate::AlwaysTrue));
        assert!(m.matches(""));
        assert!(m.matches("anything"));
    }

    #[test]
    fn prefix_and_suffix() {
        let prefix = compile("diamond_*").unwrap();
        assert!(prefix.matches("diamond_sword"));
        assert!(!prefix.matches("iron_sword"));

        let suffix = compile("*_log").unwrap();
        assert!(suffix.matches("oak_log"));
        assert!(!suffix.matches("oak_planks"));
    }

    #[test]
    fn interior_segments_are_ordered_and_anchored() {
        let m = compile("a*b*c").unwrap();
        assert!(m.matches("abc"));
        assert!(m.matches("axxbyyc"));
        assert!(!m.matches("acb"));
        assert!(!m.matches("xabc"));
        assert!(!m.matches("abcx"));
    }

    #[test]
    fn segments_do_not_overlap() {
        let m = compile("ab*ba").unwrap();
        assert!(!m.matches("aba"));
        assert!(m.matches("abba"));
    }

    #[test]
    fn contains_pattern() {
        let m = compile("*ore*").unwrap();
        assert!(m.matches("iron_ore_block"));
        assert!(m.matches("ore"));
        assert!(!m.matches("stone"));
    }

    #[test]
    fn alternation_compiles_each_side() {
        let m = compile("*foo|bar*").unwrap();
        assert!(m.matches("xfoo"));
        assert!(m.matches("barx"));
        assert!(!m.matches("foox"));
    }

    #[test]
    fn negation_wraps_remainder() {
        let m = compile("!air|cave_air").unwrap();
        assert!(!m.matches("air"));
        assert!(!m.matches("cave_air"));
        assert!(m.matches("stone"));
    }

    #[test]
    fn regex_is_anchored_and_case_insensitive() {
        let m = compile("regex:.+_ore").unwrap();
        assert!(m.matches("IRON_ORE"));
        assert!(!m.matches("iron_ore_block"));
    }

    #[test]
    fn regex_keeps_its_own_pipes() {
        let m = compile("regex:(a|b)c").unwrap();
        assert!(m.matches("ac"));
        assert!(m.matches("bc"));
    }

    #[test]
    fn malformed_regex_is_an_error_not_a_panic() {
        let err = compile("regex:([a-z").unwrap_err();
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
        assert!(compile("stone|regex:(").is_err());
    }

    #[test]
    fn advanced_classification() {
        assert!(is_advanced("regex:x"));
        assert!(is_advanced("a|b"));
        assert!(is_advanced("a*"));
        assert!(is_advanced("!a"));
        assert!(!is_advanced("stone"));
        assert!(!is_advanced("my_item"));
    }

    proptest! {
        #[test]
        fn literal_matches_only_itself(word in "[a-z_]{1,12}", other in "[a-z_]{1,12}") {
            let m = compile(&word).unwrap();
            prop_assert!(m.matches(&word));
            prop_assert!(m.matches(&word.to_uppercase()));
            prop_assert_eq!(m.matches(&other), other == word);
        }

        #[test]
        fn prefix_wildcard_accepts_extensions(prefix in "[a-z]{1,6}", rest in "[a-z_]{0,8}") {
            let m = compile(&format!("{}*", prefix)).unwrap();
            let input = format!("{}{}", prefix, rest);
            prop_assert!(m.matches(&input));
        }

        #[test]
        fn suffix_wildcard_accepts_extensions(suffix in "[a-z]{1,6}", rest in "[a-z_]{0,8}") {
            let m = compile(&format!("*{}", suffix)).unwrap();
            let input = format!("{}{}", rest, suffix);
            prop_assert!(m.matches(&input));
        }
    }
}
