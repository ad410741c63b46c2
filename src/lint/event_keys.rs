//! Event and action key checks.
//!
//! A world script's `events` section is keyed by event lines such as
//! `on player breaks stone in:spawn`. The key is split into switches
//! (`name:value`) and argument words, and the words are matched against
//! every documented event format.

use super::collector::DiagnosticCollector;
use super::rule::Severity;
use crate::analysis::events::{best_match, CouldMatcher};
use crate::meta::model::DocumentationModel;
use crate::parse::structure::LineTrackedString;

/// Most partial matches named in an unknown-event suggestion.
const MAX_SUGGESTIONS: usize = 5;

/// A switch written on an event line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSwitch {
    /// Lowercase switch name.
    pub name: String,
    pub value: String,
}

/// An event key split into argument words and switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLine {
    /// `on` or `after`.
    pub prefix: String,
    pub words: Vec<String>,
    pub switches: Vec<EventSwitch>,
}

/// Split an event key, returning `None` when it lacks an `on ` or
/// `after ` prefix.
pub fn split_event_line(key: &str, model: &DocumentationModel) -> Option<EventLine> {
    let low = key.trim().to_lowercase();
    let (prefix, rest) = ["on ", "after "]
        .iter()
        .find_map(|p| low.strip_prefix(p).map(|rest| (p.trim(), rest)))?;
    let mut line = EventLine {
        prefix: prefix.to_string(),
        words: Vec::new(),
        switches: Vec::new(),
    };
    for word in rest.split_whitespace() {
        match word.split_once(':') {
            Some((name, value)) if !name.is_empty() && !model.is_data_value(word) => {
                line.switches.push(EventSwitch {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }
            _ => line.words.push(word.to_string()),
        }
    }
    Some(line)
}

/// Best full match for `words`, trying a precise match before a lenient one.
fn match_words<'m, I>(matchers: impl Fn() -> I, words: &[&str]) -> Option<usize>
where
    I: Iterator<Item = (usize, &'m CouldMatcher)>,
{
    best_match(matchers(), words, false, true)
        .or_else(|| best_match(matchers(), words, false, false))
        .map(|(index, _, _)| index)
}

fn partial_matches<'m>(
    matchers: impl Iterator<Item = (usize, &'m CouldMatcher)>,
    words: &[&str],
) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for (_, matcher) in matchers {
        if found.len() >= MAX_SUGGESTIONS {
            break;
        }
        if matcher.try_match(words, true, false) > 0 && !found.contains(&matcher.raw) {
            found.push(matcher.raw.clone());
        }
    }
    found
}

/// Check one key of a world script's `events` section.
pub fn check_event_key(
    key: &LineTrackedString,
    model: &DocumentationModel,
    collector: &mut DiagnosticCollector,
) {
    let Some(line) = split_event_line(&key.text, model) else {
        collector.report(
            "bad_event_prefix",
            Severity::Warning,
            key.line,
            key.start,
            key.end(),
            format!("Event line '{}' must start with 'on' or 'after'", key.text),
        );
        return;
    };
    if model.events().is_empty() {
        return;
    }

    let words: Vec<&str> = line.words.iter().map(String::as_str).collect();
    let Some(index) = match_words(|| model.event_matchers(), &words) else {
        let partial = partial_matches(model.event_matchers(), &words);
        let message = format!("Unknown event '{}'", words.join(" "));
        if partial.is_empty() {
            collector.report("unknown_event", Severity::Warning, key.line, key.start, key.end(), message);
        } else {
            collector.report_with_suggestion(
                "unknown_event",
                Severity::Warning,
                key.line,
                key.start,
                key.end(),
                message,
                format!("Possible matches: {}", partial.join(", ")),
            );
        }
        return;
    };
    tracing::trace!(key = %key.text, event = index, "matched event line");

    let event = &model.events()[index];
    if let Some(reason) = &event.deprecated {
        collector.report(
            "deprecated_event",
            Severity::Warning,
            key.line,
            key.start,
            key.end(),
            format!("Event '{}' is deprecated: {reason}", words.join(" ")),
        );
    }
    for switch in &line.switches {
        let known = event.switches.iter().any(|s| *s == switch.name)
            || model.global_switches().contains(&switch.name);
        if !known {
            collector.report(
                "bad_event_switch",
                Severity::Warning,
                key.line,
                key.start,
                key.end(),
                format!(
                    "Switch '{}' is not valid for event '{}'",
                    switch.name,
                    event.events.first().map(String::as_str).unwrap_or_default()
                ),
            );
        }
    }
}

/// Check one key of an assignment script's `actions` section.
pub fn check_action_key(
    key: &LineTrackedString,
    model: &DocumentationModel,
    collector: &mut DiagnosticCollector,
) {
    let Some(rest) = key.low.trim().strip_prefix("on ") else {
        collector.report(
            "bad_event_prefix",
            Severity::Warning,
            key.line,
            key.start,
            key.end(),
            format!("Action line '{}' must start with 'on'", key.text),
        );
        return;
    };
    if model.actions().is_empty() {
        return;
    }
    let words: Vec<&str> = rest.split_whitespace().collect();
    if match_words(|| model.action_matchers(), &words).is_none() {
        collector.report(
            "unknown_action",
            Severity::Warning,
            key.line,
            key.start,
            key.end(),
            format!("Unknown assignment action '{}'", words.join(" ")),
        );
    }
}
