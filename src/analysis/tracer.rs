//! Tag type tracing.
//!
//! [`trace_tag`] walks a lexed tag part by part through the documented
//! tags and object types, tracking the set of types the value may have
//! after each step. A part that no candidate type documents is reported,
//! as is a parameter that breaks a documented tag's contract.
//!
//! Tracing stops quietly (without error) as soon as the type becomes too
//! vague to follow, for example after a definition reference or a tag
//! that returns the generic `ObjectTag`.

use crate::meta::model::DocumentationModel;
use crate::meta::objects::{MetaTag, ParamRule};
use crate::meta::types::ObjectTypeId;
use crate::parse::tag::{ParsedTag, TagPart};
use std::collections::BTreeSet;
use std::fmt;

/// Bases whose type cannot be known statically.
const VAGUE_ROOTS: &[&str] = &["", "context", "entry", "def", "definition"];

/// Base that always yields an `ElementTag`.
const ELEMENT_ROOT: &str = "element";

/// Most type names listed in a missing-part message.
const MAX_NAMED_TYPES: usize = 4;

/// What kind of problem the tracer found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceErrorKind {
    /// The first part names no tag or object type.
    BadBase,
    /// A later part exists on none of the candidate types.
    BadPart,
    /// A documented part requires a parameter that is missing.
    ParamRequired,
    /// A documented part forbids the parameter that was given.
    ParamForbidden,
    /// A matched tag is deprecated. Tracing continues.
    Deprecated,
}

/// A problem at one part of a traced tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceError {
    /// Index of the offending part.
    pub part_index: usize,
    pub kind: TraceErrorKind,
    pub message: String,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Trace a lexed tag through the documentation model.
///
/// Returns `false` if a fatal problem stopped the trace. Deprecation
/// notices are reported but do not fail the trace.
pub fn trace_tag(
    tag: &ParsedTag,
    model: &DocumentationModel,
    mut on_error: impl FnMut(TraceError),
) -> bool {
    let Some(first) = tag.parts.first() else {
        return true;
    };
    let base = first.text.to_lowercase();
    if VAGUE_ROOTS.contains(&base.as_str()) {
        return true;
    }

    let (mut types, mut index) = match resolve_root(tag, &base, model, &mut on_error) {
        Root::Typed(types, consumed) => (types, consumed),
        Root::Vague => return true,
        Root::Failed => return false,
    };

    while index < tag.parts.len() {
        let candidates = model.types().closure(&types);
        let Some((length, matched)) = longest_sub_tag(tag, index, &candidates, model) else {
            on_error(TraceError {
                part_index: index,
                kind: TraceErrorKind::BadPart,
                message: missing_part_message(&tag.parts[index], &types, model),
            });
            return false;
        };

        let consumed = &tag.parts[index..index + length];
        let valid: Vec<&MetaTag> = matched
            .iter()
            .copied()
            .filter(|meta| params_fit(meta, consumed))
            .collect();
        if valid.is_empty() {
            if let Some(meta) = matched.first() {
                on_error(param_error(meta, consumed, index));
            }
            return false;
        }
        if let Some(meta) = valid.iter().find(|m| m.deprecated.is_some()) {
            on_error(deprecation(meta, index));
        }

        match return_types(valid.iter().copied(), model) {
            Some(next) => types = next,
            None => return true,
        }
        index += length;
    }
    true
}

enum Root {
    Typed(BTreeSet<ObjectTypeId>, usize),
    Vague,
    Failed,
}

fn resolve_root(
    tag: &ParsedTag,
    base: &str,
    model: &DocumentationModel,
    on_error: &mut impl FnMut(TraceError),
) -> Root {
    if base == ELEMENT_ROOT {
        return match model.types().id("elementtag") {
            Some(id) => Root::Typed(BTreeSet::from([id]), 1),
            None => Root::Vague,
        };
    }

    for length in (1..=4).rev() {
        if length > tag.parts.len() {
            continue;
        }
        let consumed = &tag.parts[..length];
        let Some(meta) = model.tag(&joined_key(consumed)) else {
            continue;
        };
        if !params_fit(meta, consumed) {
            on_error(param_error(meta, consumed, 0));
            return Root::Failed;
        }
        if meta.deprecated.is_some() {
            on_error(deprecation(meta, 0));
        }
        return match return_types(std::iter::once(meta), model) {
            Some(types) => Root::Typed(types, length),
            None => Root::Vague,
        };
    }

    let type_id = model
        .types()
        .id(base)
        .or_else(|| model.types().id(&format!("{}tag", base)));
    if let Some(id) = type_id {
        return Root::Typed(BTreeSet::from([id]), 1);
    }

    on_error(TraceError {
        part_index: 0,
        kind: TraceErrorKind::BadBase,
        message: format!("Tag base '{}' does not exist", tag.parts[0].text),
    });
    Root::Failed
}

fn joined_key(parts: &[TagPart]) -> String {
    parts
        .iter()
        .map(|p| p.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(".")
}

/// Find the longest (3, 2, then 1 part) sub-tag key any candidate offers.
fn longest_sub_tag<'m>(
    tag: &ParsedTag,
    index: usize,
    candidates: &BTreeSet<ObjectTypeId>,
    model: &'m DocumentationModel,
) -> Option<(usize, Vec<&'m MetaTag>)> {
    for length in (1..=3).rev() {
        if index + length > tag.parts.len() {
            continue;
        }
        let key = joined_key(&tag.parts[index..index + length]);
        let matched: Vec<&MetaTag> = candidates
            .iter()
            .filter_map(|id| model.types().sub_tag(*id, &key))
            .filter_map(|i| model.tag_at(i))
            .collect();
        if !matched.is_empty() {
            return Some((length, matched));
        }
    }
    None
}

/// Documented part contracts aligned with the consumed parts.
fn aligned_rules(meta: &MetaTag, consumed: usize) -> impl Iterator<Item = ParamRule> + '_ {
    let skip = meta.parts.len().saturating_sub(consumed);
    meta.parts[skip..].iter().map(|p| p.param)
}

fn params_fit(meta: &MetaTag, consumed: &[TagPart]) -> bool {
    aligned_rules(meta, consumed.len())
        .zip(consumed)
        .all(|(rule, part)| rule.allows(part.parameter.is_some()))
}

fn param_error(meta: &MetaTag, consumed: &[TagPart], index: usize) -> TraceError {
    let (offset, rule, part) = aligned_rules(meta, consumed.len())
        .zip(consumed)
        .enumerate()
        .find(|(_, (rule, part))| !rule.allows(part.parameter.is_some()))
        .map(|(offset, (rule, part))| (offset, rule, part))
        .unwrap_or((0, ParamRule::Required, &consumed[0]));
    let (kind, message) = if rule == ParamRule::Required {
        (
            TraceErrorKind::ParamRequired,
            format!("Tag part '{}' requires a [parameter] ({})", part.text, meta.attribute),
        )
    } else {
        (
            TraceErrorKind::ParamForbidden,
            format!("Tag part '{}' cannot have a [parameter] ({})", part.text, meta.attribute),
        )
    };
    TraceError {
        part_index: index + offset,
        kind,
        message,
    }
}

fn deprecation(meta: &MetaTag, index: usize) -> TraceError {
    let note = meta.deprecated.as_deref().unwrap_or_default();
    TraceError {
        part_index: index,
        kind: TraceErrorKind::Deprecated,
        message: format!("Tag {} is deprecated: {}", meta.attribute, note),
    }
}

/// Union of the documented return types, or `None` when the result is too
/// vague to keep tracing.
fn return_types<'m>(
    tags: impl Iterator<Item = &'m MetaTag>,
    model: &DocumentationModel,
) -> Option<BTreeSet<ObjectTypeId>> {
    let mut types = BTreeSet::new();
    for meta in tags {
        let name = meta.returns.split('(').next().unwrap_or_default().trim();
        types.insert(model.types().id(name)?);
    }
    let root = model.types().root();
    if types.is_empty() || (types.len() == 1 && root.is_some_and(|r| types.contains(&r))) {
        return None;
    }
    Some(types)
}

fn missing_part_message(
    part: &TagPart,
    types: &BTreeSet<ObjectTypeId>,
    model: &DocumentationModel,
) -> String {
    if types.len() <= MAX_NAMED_TYPES {
        let names: Vec<&str> = types.iter().map(|id| model.types().name(*id)).collect();
        format!(
            "Tag part '{}' does not exist for type(s) {}",
            part.text,
            names.join(", ")
        )
    } else {
        format!(
            "Tag part '{}' does not exist for any of the {} possible types",
            part.text,
            types.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::loader::{parse_meta_text, LoadedSources};
    use crate::meta::model::ModelBuilder;
    use crate::parse::tag::parse_tag;

    const DOCS: &str = r#"
<--[objecttype]
@name ObjectTag
-->
<--[objecttype]
@name ElementTag
@base ObjectTag
-->
<--[objecttype]
@name ListTag
@base ObjectTag
-->
<--[objecttype]
@name EntityTag
@base ObjectTag
-->
<--[objecttype]
@name PlayerTag
@base EntityTag
-->
<--[tag]
@attribute <player>
@returns PlayerTag
-->
<--[tag]
@attribute <EntityTag.location>
@returns ElementTag
-->
<--[tag]
@attribute <PlayerTag.name>
@returns ElementTag
-->
<--[tag]
@attribute <PlayerTag.flag[<name>]>
@returns ObjectTag
-->
<--[tag]
@attribute <ElementTag.length>
@returns ElementTag(Number)
-->
<--[tag]
@attribute <ElementTag.split[(<text>)]>
@returns ListTag
-->
<--[tag]
@attribute <ElementTag.as_list>
@returns ListTag
@deprecated use split
-->
<--[tag]
@attribute <util.random.int[<#>].to[<#>]>
@returns ElementTag
-->
<--[tag]
@attribute <server>
@returns ElementTag
-->
<--[tag]
@attribute <server.flag[<name>]>
@returns ElementTag
-->
<--[tag]
@attribute <ElementTag.to_list>
@returns ListTag
-->
<--[tag]
@attribute <ElementTag.to_list.size>
@returns ElementTag
-->
"#;

    fn model() -> DocumentationModel {
        let mut loaded = LoadedSources::default();
        parse_meta_text(DOCS, "docs.meta", &mut loaded);
        assert!(loaded.warnings.is_empty(), "{:?}", loaded.warnings);
        ModelBuilder::from_sources(loaded).build()
    }

    fn trace(text: &str) -> (bool, Vec<TraceError>) {
        let model = model();
        let tag = parse_tag(text, |_| {});
        let mut errors = Vec::new();
        let ok = trace_tag(&tag, &model, |e| errors.push(e));
        (ok, errors)
    }

    #[test]
    fn valid_chain_through_inherited_tags() {
        let (ok, errors) = trace("player.location.length");
        assert!(ok);
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn unknown_base() {
        let (ok, errors) = trace("nothing.name");
        assert!(!ok);
        assert_eq!(errors[0].kind, TraceErrorKind::BadBase);
        assert_eq!(errors[0].part_index, 0);
    }

    #[test]
    fn unknown_part_names_types() {
        let (ok, errors) = trace("player.name.bogus");
        assert!(!ok);
        assert_eq!(errors[0].kind, TraceErrorKind::BadPart);
        assert_eq!(errors[0].part_index, 2);
        assert!(errors[0].message.contains("ElementTag"));
    }

    #[test]
    fn multi_part_root_wins_over_single_part() {
        let (ok, errors) = trace("server.flag[x].length");
        assert!(ok, "{:?}", errors);
        assert!(errors.is_empty());

        let (ok, _) = trace("util.random.int[1].to[5].length");
        assert!(ok);
    }

    #[test]
    fn longest_sub_tag_wins() {
        let (ok, errors) = trace("player.name.to_list.size.length");
        assert!(ok, "{:?}", errors);
    }

    #[test]
    fn parameter_contracts() {
        let (ok, errors) = trace("player.flag");
        assert!(!ok);
        assert_eq!(errors[0].kind, TraceErrorKind::ParamRequired);
        assert_eq!(errors[0].part_index, 1);

        let (ok, errors) = trace("player.name[x]");
        assert!(!ok);
        assert_eq!(errors[0].kind, TraceErrorKind::ParamForbidden);

        let (ok, _) = trace("player.name.split");
        assert!(ok);
        let (ok, _) = trace("player.name.split[,]");
        assert!(ok);
    }

    #[test]
    fn deprecation_is_reported_but_not_fatal() {
        let (ok, errors) = trace("player.name.as_list");
        assert!(ok);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, TraceErrorKind::Deprecated);
    }

    #[test]
    fn vague_results_stop_quietly() {
        assert_eq!(trace("player.flag[x].anything.at.all"), (true, vec![]));
        assert_eq!(trace("[def].anything"), (true, vec![]));
        assert_eq!(trace("context.whatever"), (true, vec![]));
    }

    #[test]
    fn element_root_and_object_type_root() {
        assert_eq!(trace("element[hi].length"), (true, vec![]));
        let (ok, errors) = trace("element[hi].nope");
        assert!(!ok);
        assert_eq!(errors[0].kind, TraceErrorKind::BadPart);
        assert_eq!(trace("elementtag.length"), (true, vec![]));
    }
}
