//! Event and action format matching.
//!
//! Documented formats such as `player breaks <material>` or
//! `on (cancelled )entity dies` are compiled into [`CouldMatcher`]s, one
//! per expansion of the optional `(...)` group. A matcher scores a
//! candidate line's words from 0 (no match) to 10.
//!
//! # Example
//!
//! ```
//! use scriptcheck::analysis::events::compile_matchers;
//! use scriptcheck::meta::validators::ValidatorRegistry;
//! use std::collections::HashMap;
//!
//! let validators = ValidatorRegistry::with_builtins(&HashMap::new());
//! let matchers = compile_matchers("player (right|left) clicks <block>", &validators, &mut |_| {});
//! assert_eq!(matchers.len(), 2);
//! assert!(matchers[1].try_match(&["player", "left", "clicks", "stone"], false, false) > 0);
//! ```

use crate::meta::validators::ValidatorFn;
use crate::meta::validators::ValidatorRegistry;
use std::fmt;

/// Score for a literal or alternation hit.
const LITERAL_HIT: u8 = 10;
/// Score of a `<'quoted'>` placeholder slot.
const PLACEHOLDER: u8 = 2;
/// Score of a slot whose validator is unknown.
const UNKNOWN_VALIDATOR: u8 = 1;

/// Validator for one word position.
#[derive(Clone)]
pub enum SlotValidator {
    /// Accepts every word with a fixed strength.
    AlwaysTrue(u8),
    /// Exact (lowercased) word.
    Literal(String),
    /// One of several (lowercased) words.
    OneOf(Vec<String>),
    /// A named semantic validator.
    Named { name: String, func: ValidatorFn },
}

impl SlotValidator {
    /// Score one word.
    pub fn score(&self, word: &str, strict: bool) -> u8 {
        match self {
            SlotValidator::AlwaysTrue(strength) => *strength,
            SlotValidator::Literal(text) => {
                if word.eq_ignore_ascii_case(text) {
                    LITERAL_HIT
                } else {
                    0
                }
            }
            SlotValidator::OneOf(options) => {
                let lowered = word.to_lowercase();
                if options.contains(&lowered) {
                    LITERAL_HIT
                } else {
                    0
                }
            }
            SlotValidator::Named { func, .. } => func(word, strict),
        }
    }

    /// Whether the slot was written as `<...>`.
    pub fn is_bracketed(&self) -> bool {
        matches!(self, SlotValidator::AlwaysTrue(_) | SlotValidator::Named { .. })
    }
}

impl fmt::Debug for SlotValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValidator::AlwaysTrue(strength) => write!(f, "AlwaysTrue({})", strength),
            SlotValidator::Literal(text) => write!(f, "Literal({:?})", text),
            SlotValidator::OneOf(options) => write!(f, "OneOf({:?})", options),
            SlotValidator::Named { name, .. } => write!(f, "Named({:?})", name),
        }
    }
}

/// A compiled format phrase.
#[derive(Debug, Clone)]
pub struct CouldMatcher {
    /// The expanded phrase this matcher was built from.
    pub raw: String,
    pub slots: Vec<SlotValidator>,
    /// Slot indices, literal slots first.
    pub order: Vec<usize>,
}

impl CouldMatcher {
    /// Compile one expanded phrase (no optional groups).
    pub fn compile(
        phrase: &str,
        validators: &ValidatorRegistry,
        on_error: &mut impl FnMut(String),
    ) -> Self {
        let slots: Vec<SlotValidator> = phrase
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(|word| compile_slot(word, phrase, validators, on_error))
            .collect();
        let mut order: Vec<usize> = (0..slots.len()).filter(|i| !slots[*i].is_bracketed()).collect();
        order.extend((0..slots.len()).filter(|i| slots[*i].is_bracketed()));
        Self {
            raw: phrase.to_string(),
            slots,
            order,
        }
    }

    /// Score a candidate's words against this matcher.
    ///
    /// With `partial`, a candidate shorter than the matcher may match, but
    /// only ever with strength 1.
    pub fn try_match(&self, words: &[&str], partial: bool, strict: bool) -> u8 {
        let is_partial = words.len() < self.slots.len();
        if words.len() != self.slots.len() && !(partial && is_partial) {
            return 0;
        }
        if words.is_empty() {
            return 0;
        }
        let mut strongest = 0;
        for &index in &self.order {
            let Some(word) = words.get(index) else {
                continue;
            };
            let strength = self.slots[index].score(word, strict);
            if strength == 0 {
                return 0;
            }
            strongest = strongest.max(strength);
        }
        tracing::trace!(matcher = %self.raw, strongest, is_partial, "scored candidate");
        if is_partial {
            1
        } else {
            strongest
        }
    }

    /// Whether this matcher fits `words` better than `other`.
    ///
    /// More slots always wins; otherwise slots are compared one by one in
    /// this matcher's evaluation order and ties favor `self`.
    pub fn is_better_match_than(&self, other: &CouldMatcher, words: &[&str], strict: bool) -> bool {
        if self.slots.len() != other.slots.len() {
            return self.slots.len() > other.slots.len();
        }
        let mut net = 0i32;
        for &index in &self.order {
            let Some(word) = words.get(index) else {
                continue;
            };
            let mine = i32::from(self.slots[index].score(word, strict));
            let theirs = i32::from(other.slots[index].score(word, strict));
            net += (mine - theirs).signum();
        }
        net >= 0
    }
}

impl fmt::Display for CouldMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn compile_slot(
    word: &str,
    phrase: &str,
    validators: &ValidatorRegistry,
    on_error: &mut impl FnMut(String),
) -> SlotValidator {
    if let Some(inner) = word.strip_prefix('<').and_then(|w| w.strip_suffix('>')) {
        if inner.len() >= 2 && inner.starts_with('\'') && inner.ends_with('\'') {
            return SlotValidator::AlwaysTrue(PLACEHOLDER);
        }
        return match validators.get(inner) {
            Some(func) => SlotValidator::Named {
                name: inner.to_lowercase(),
                func,
            },
            None => {
                on_error(format!("Unknown validator '<{}>' in format '{}'", inner, phrase));
                SlotValidator::AlwaysTrue(UNKNOWN_VALIDATOR)
            }
        };
    }
    if word.contains('|') {
        return SlotValidator::OneOf(word.split('|').map(str::to_lowercase).collect());
    }
    SlotValidator::Literal(word.to_lowercase())
}

/// Expand `(...)` groups into plain phrases.
///
/// A group with a top-level `|` yields one phrase per alternative. Any
/// other group yields one phrase without it and one with its content.
/// Unbalanced parentheses are reported and yield no phrases.
pub fn expand_optionals(format: &str, on_error: &mut impl FnMut(String)) -> Vec<String> {
    let mut phrases = Vec::new();
    if expand_into(format, format, &mut phrases, on_error) {
        phrases
    } else {
        Vec::new()
    }
}

fn expand_into(
    text: &str,
    format: &str,
    phrases: &mut Vec<String>,
    on_error: &mut impl FnMut(String),
) -> bool {
    let Some(open) = text.find(['(', ')']) else {
        let phrase = normalize_spaces(text);
        if !phrase.is_empty() && !phrases.contains(&phrase) {
            phrases.push(phrase);
        }
        return true;
    };
    if text[open..].starts_with(')') {
        on_error(format!("Unbalanced ')' in format '{}'", format));
        return false;
    }
    let Some(close) = matching_paren(text, open) else {
        on_error(format!("Unclosed '(' in format '{}'", format));
        return false;
    };
    let before = &text[..open];
    let content = &text[open + 1..close];
    let after = &text[close + 1..];

    let alternatives = split_top_level_pipes(content);
    let mut variants = Vec::new();
    if alternatives.len() > 1 {
        for alternative in alternatives {
            variants.push(format!("{}{}{}", before, alternative, after));
        }
    } else {
        variants.push(format!("{}{}", before, after));
        variants.push(format!("{}{}{}", before, content, after));
    }
    variants
        .iter()
        .all(|variant| expand_into(variant, format, phrases, on_error))
}

fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + index);
                }
            }
            _ => {}
        }
    }
    None
}

fn split_top_level_pipes(content: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in content.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                parts.push(&content[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&content[start..]);
    parts
}

fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Expand and compile every phrase of a format.
pub fn compile_matchers(
    format: &str,
    validators: &ValidatorRegistry,
    on_error: &mut impl FnMut(String),
) -> Vec<CouldMatcher> {
    expand_optionals(format, on_error)
        .iter()
        .map(|phrase| CouldMatcher::compile(phrase, validators, on_error))
        .collect()
}

/// Pick the strongest matcher for `words`, breaking ties with
/// [`CouldMatcher::is_better_match_than`].
pub fn best_match<'a, T: Copy>(
    candidates: impl IntoIterator<Item = (T, &'a CouldMatcher)>,
    words: &[&str],
    partial: bool,
    strict: bool,
) -> Option<(T, &'a CouldMatcher, u8)> {
    let mut best: Option<(T, &'a CouldMatcher, u8)> = None;
    for (owner, matcher) in candidates {
        let strength = matcher.try_match(words, partial, strict);
        if strength == 0 {
            continue;
        }
        let replace = match &best {
            None => true,
            Some((_, current, current_strength)) => {
                strength > *current_strength
                    || (strength == *current_strength
                        && !current.is_better_match_than(matcher, words, strict))
            }
        };
        if replace {
            best = Some((owner, matcher, strength));
        }
    }
    best
}
