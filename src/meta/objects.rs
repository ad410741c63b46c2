//! Documented object kinds.
//!
//! Every documentation block describes exactly one of a closed set of
//! kinds. [`MetaObject`] wraps the per-kind structs and dispatches the
//! shared capabilities (naming, settings, post-load validation and search
//! text) by kind.

use crate::parse::tag::parse_tag;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static RE_SYNTAX_SWITCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_]+):[<(\[\w]").unwrap());

/// Parameter contract of one documented tag part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRule {
    /// The part must not have a bracket parameter.
    Forbidden,
    /// The part may have a bracket parameter.
    Optional,
    /// The part must have a bracket parameter.
    Required,
}

impl ParamRule {
    /// Whether a part with (or without) a parameter satisfies this rule.
    pub fn allows(&self, has_parameter: bool) -> bool {
        match self {
            ParamRule::Forbidden => !has_parameter,
            ParamRule::Optional => true,
            ParamRule::Required => has_parameter,
        }
    }
}

/// One part of a documented tag attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPartSpec {
    pub name: String,
    pub param: ParamRule,
}

/// A documented script command.
#[derive(Debug, Clone, Default)]
pub struct MetaCommand {
    pub name: String,
    pub syntax: String,
    pub short: String,
    pub required: usize,
    /// `None` means unlimited.
    pub maximum: Option<usize>,
    pub group: String,
    pub deprecated: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub usage: Vec<String>,
    /// Switch prefixes derived from the syntax (lowercased).
    pub switches: Vec<String>,
}

/// A documented tag.
#[derive(Debug, Clone, Default)]
pub struct MetaTag {
    /// Attribute text as written, e.g. `<PlayerTag.name>`.
    pub attribute: String,
    pub parts: Vec<TagPartSpec>,
    pub returns: String,
    pub deprecated: Option<String>,
    pub description: String,
    pub mechanism: String,
}

/// A documented world event.
#[derive(Debug, Clone, Default)]
pub struct MetaEvent {
    pub events: Vec<String>,
    /// Switch names (lowercased).
    pub switches: Vec<String>,
    pub location: bool,
    pub player: String,
    pub cancellable: bool,
    pub context: String,
    pub deprecated: Option<String>,
    pub group: String,
}

/// A documented assignment-script action.
#[derive(Debug, Clone, Default)]
pub struct MetaAction {
    pub actions: Vec<String>,
    pub triggers: String,
    pub context: String,
}

/// A documented mechanism.
#[derive(Debug, Clone, Default)]
pub struct MetaMechanism {
    pub object: String,
    pub name: String,
    pub input: String,
    pub deprecated: Option<String>,
    pub description: String,
}

/// A documented object type.
#[derive(Debug, Clone, Default)]
pub struct MetaObjectType {
    pub name: String,
    pub prefix: String,
    pub base: String,
    pub implements: Vec<String>,
    pub format: String,
    pub description: String,
}

/// A documented property: a tag and a mechanism sharing one name.
#[derive(Debug, Clone, Default)]
pub struct MetaProperty {
    pub object: String,
    pub name: String,
    pub input: String,
    pub deprecated: Option<String>,
    pub description: String,
}

/// A named set of known values (materials, entity types, ...).
#[derive(Debug, Clone, Default)]
pub struct MetaData {
    pub name: String,
    pub values: Vec<String>,
}

/// The closed set of documented kinds.
#[derive(Debug, Clone)]
pub enum MetaObject {
    Command(MetaCommand),
    Tag(MetaTag),
    Event(MetaEvent),
    Action(MetaAction),
    Mechanism(MetaMechanism),
    ObjectType(MetaObjectType),
    Property(MetaProperty),
    Data(MetaData),
}

/// Settings every kind accepts and ignores.
const PASSIVE_KEYS: &[&str] = &["plugin", "warning", "example", "synonyms", "see", "note"];

impl MetaObject {
    /// Create an empty object for a block kind name (case-insensitive).
    pub fn for_kind(kind: &str) -> Option<Self> {
        let object = match kind.trim().to_lowercase().as_str() {
            "command" => MetaObject::Command(MetaCommand::default()),
            "tag" => MetaObject::Tag(MetaTag::default()),
            "event" => MetaObject::Event(MetaEvent::default()),
            "action" => MetaObject::Action(MetaAction::default()),
            "mechanism" => MetaObject::Mechanism(MetaMechanism::default()),
            "objecttype" => MetaObject::ObjectType(MetaObjectType::default()),
            "property" => MetaObject::Property(MetaProperty::default()),
            "data" => MetaObject::Data(MetaData::default()),
            _ => return None,
        };
        Some(object)
    }

    /// Kind name as written in documentation blocks.
    pub fn kind(&self) -> &'static str {
        match self {
            MetaObject::Command(_) => "command",
            MetaObject::Tag(_) => "tag",
            MetaObject::Event(_) => "event",
            MetaObject::Action(_) => "action",
            MetaObject::Mechanism(_) => "mechanism",
            MetaObject::ObjectType(_) => "objecttype",
            MetaObject::Property(_) => "property",
            MetaObject::Data(_) => "data",
        }
    }

    /// Display name of the object.
    pub fn name(&self) -> String {
        match self {
            MetaObject::Command(c) => c.name.clone(),
            MetaObject::Tag(t) => t.attribute.clone(),
            MetaObject::Event(e) => e.events.first().cloned().unwrap_or_default(),
            MetaObject::Action(a) => a.actions.first().cloned().unwrap_or_default(),
            MetaObject::Mechanism(m) => format!("{}.{}", m.object, m.name),
            MetaObject::ObjectType(o) => o.name.clone(),
            MetaObject::Property(p) => format!("{}.{}", p.object, p.name),
            MetaObject::Data(d) => d.name.clone(),
        }
    }

    /// Apply one `@key value` setting.
    ///
    /// Returns a message describing why the setting was rejected.
    pub fn apply_setting(&mut self, key: &str, value: &str) -> Result<(), String> {
        let key = key.trim().to_lowercase();
        let value = value.trim();
        let accepted = match self {
            MetaObject::Command(c) => c.apply(&key, value)?,
            MetaObject::Tag(t) => t.apply(&key, value),
            MetaObject::Event(e) => e.apply(&key, value),
            MetaObject::Action(a) => a.apply(&key, value),
            MetaObject::Mechanism(m) => m.apply(&key, value),
            MetaObject::ObjectType(o) => o.apply(&key, value),
            MetaObject::Property(p) => p.apply(&key, value),
            MetaObject::Data(d) => d.apply(&key, value),
        };
        if accepted || PASSIVE_KEYS.contains(&key.as_str()) {
            Ok(())
        } else {
            Err(format!("Unknown setting '{}' for {}", key, self.kind()))
        }
    }

    /// Names of required settings that were never given.
    pub fn post_check(&self) -> Vec<String> {
        let required: Vec<(&str, bool)> = match self {
            MetaObject::Command(c) => vec![("name", c.name.is_empty()), ("syntax", c.syntax.is_empty())],
            MetaObject::Tag(t) => vec![
                ("attribute", t.attribute.is_empty()),
                ("returns", t.returns.is_empty()),
            ],
            MetaObject::Event(e) => vec![("events", e.events.is_empty())],
            MetaObject::Action(a) => vec![("actions", a.actions.is_empty())],
            MetaObject::Mechanism(m) => vec![("object", m.object.is_empty()), ("name", m.name.is_empty())],
            MetaObject::ObjectType(o) => vec![("name", o.name.is_empty())],
            MetaObject::Property(p) => vec![("object", p.object.is_empty()), ("name", p.name.is_empty())],
            MetaObject::Data(d) => vec![("name", d.name.is_empty())],
        };
        required
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(key, _)| format!("{} is missing required setting '{}'", self.kind(), key))
            .collect()
    }

    /// Lowercased text used for free-text search.
    pub fn search_text(&self) -> String {
        let text = match self {
            MetaObject::Command(c) => format!("{} {} {} {}", c.name, c.short, c.group, c.description),
            MetaObject::Tag(t) => format!("{} {} {}", t.attribute, t.returns, t.description),
            MetaObject::Event(e) => format!("{} {}", e.events.join(" "), e.group),
            MetaObject::Action(a) => format!("{} {}", a.actions.join(" "), a.triggers),
            MetaObject::Mechanism(m) => format!("{} {} {}", m.object, m.name, m.description),
            MetaObject::ObjectType(o) => format!("{} {} {}", o.name, o.prefix, o.description),
            MetaObject::Property(p) => format!("{} {} {}", p.object, p.name, p.description),
            MetaObject::Data(d) => d.name.clone(),
        };
        text.to_lowercase()
    }
}

impl fmt::Display for MetaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.name())
    }
}

fn lines_of(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

fn deprecation(value: &str) -> Option<String> {
    Some(value.to_string())
}

impl MetaCommand {
    fn apply(&mut self, key: &str, value: &str) -> Result<bool, String> {
        match key {
            "name" => self.name = value.to_string(),
            "syntax" => {
                self.syntax = value.to_string();
                self.switches = switches_from_syntax(value);
            }
            "short" => self.short = value.to_string(),
            "required" => {
                self.required = value
                    .parse()
                    .map_err(|_| format!("'required' must be a whole number, got '{}'", value))?;
            }
            "maximum" => {
                let parsed: i64 = value
                    .parse()
                    .map_err(|_| format!("'maximum' must be a whole number, got '{}'", value))?;
                self.maximum = usize::try_from(parsed).ok();
            }
            "group" => self.group = value.to_string(),
            "deprecated" => self.deprecated = deprecation(value),
            "description" => self.description = value.to_string(),
            "tags" => self.tags = lines_of(value).collect(),
            "usage" => self.usage.push(value.to_string()),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Whether the command accepts any number of arguments.
    pub fn is_unlimited(&self) -> bool {
        self.maximum.is_none()
    }
}

/// Switch prefixes named in a command syntax line, such as `save` in
/// `- run [<script>] (save:<name>)`.
pub fn switches_from_syntax(syntax: &str) -> Vec<String> {
    let mut switches: Vec<String> = Vec::new();
    for caps in RE_SYNTAX_SWITCH.captures_iter(syntax) {
        let name = caps[1].to_lowercase();
        if !switches.contains(&name) {
            switches.push(name);
        }
    }
    switches
}

impl MetaTag {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "attribute" => {
                self.attribute = value.to_string();
                self.parts = attribute_parts(value);
            }
            "returns" => self.returns = value.to_string(),
            "deprecated" => self.deprecated = deprecation(value),
            "description" => self.description = value.to_string(),
            "mechanism" => self.mechanism = value.to_string(),
            _ => return false,
        }
        true
    }

    /// Normalized dotted key, e.g. `playertag.name`.
    pub fn key(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Split a documented attribute such as `<PlayerTag.flag[<name>]>` into part
/// contracts.
pub fn attribute_parts(attribute: &str) -> Vec<TagPartSpec> {
    let inner = attribute.trim();
    let inner = inner.strip_prefix('<').unwrap_or(inner);
    let inner = inner.strip_suffix('>').unwrap_or(inner);
    parse_tag(inner, |_| {})
        .parts
        .into_iter()
        .map(|part| {
            let param = match part.parameter.as_deref() {
                None => ParamRule::Forbidden,
                Some(p) if p.starts_with('(') && p.ends_with(')') => ParamRule::Optional,
                Some(_) => ParamRule::Required,
            };
            TagPartSpec {
                name: part.text.to_lowercase(),
                param,
            }
        })
        .collect()
}

impl MetaEvent {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "events" => self.events = lines_of(value).collect(),
            "switch" | "switches" => {
                for line in lines_of(value) {
                    let name = line.split(':').next().unwrap_or_default().trim().to_lowercase();
                    if !name.is_empty() && !self.switches.contains(&name) {
                        self.switches.push(name);
                    }
                }
            }
            "location" => {
                self.location = value.eq_ignore_ascii_case("true");
                if self.location {
                    self.add_switches(&["in", "location_flagged"]);
                }
            }
            "player" => {
                self.player = value.to_string();
                if !value.is_empty() {
                    self.add_switches(&["flagged", "permission"]);
                }
            }
            "cancellable" => self.cancellable = value.eq_ignore_ascii_case("true"),
            "context" => self.context = value.to_string(),
            "deprecated" => self.deprecated = deprecation(value),
            "group" => self.group = value.to_string(),
            "triggers" | "determine" | "regex" => {}
            _ => return false,
        }
        true
    }

    fn add_switches(&mut self, names: &[&str]) {
        for name in names {
            if !self.switches.iter().any(|s| s == name) {
                self.switches.push((*name).to_string());
            }
        }
    }
}

impl MetaAction {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "actions" => self.actions = lines_of(value).collect(),
            "triggers" => self.triggers = value.to_string(),
            "context" => self.context = value.to_string(),
            "determine" => {}
            _ => return false,
        }
        true
    }
}

impl MetaMechanism {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "object" => self.object = value.to_string(),
            "name" => self.name = value.to_string(),
            "input" => self.input = value.to_string(),
            "deprecated" => self.deprecated = deprecation(value),
            "description" => self.description = value.to_string(),
            "tags" => {}
            _ => return false,
        }
        true
    }
}

impl MetaObjectType {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "name" => self.name = value.to_string(),
            "prefix" => self.prefix = value.to_string(),
            "base" => self.base = value.to_string(),
            "implements" => {
                self.implements = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "format" => self.format = value.to_string(),
            "description" => self.description = value.to_string(),
            "identity" => {}
            _ => return false,
        }
        true
    }
}

impl MetaProperty {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "object" => self.object = value.to_string(),
            "name" => self.name = value.to_string(),
            "input" => self.input = value.to_string(),
            "deprecated" => self.deprecated = deprecation(value),
            "description" => self.description = value.to_string(),
            _ => return false,
        }
        true
    }

    /// The tag this property exposes.
    pub fn to_tag(&self) -> MetaTag {
        let attribute = format!("<{}.{}>", self.object, self.name);
        MetaTag {
            parts: attribute_parts(&attribute),
            attribute,
            returns: self.input.clone(),
            deprecated: self.deprecated.clone(),
            description: self.description.clone(),
            mechanism: format!("{}.{}", self.object, self.name),
        }
    }

    /// The mechanism this property exposes.
    pub fn to_mechanism(&self) -> MetaMechanism {
        MetaMechanism {
            object: self.object.clone(),
            name: self.name.clone(),
            input: self.input.clone(),
            deprecated: self.deprecated.clone(),
            description: self.description.clone(),
        }
    }
}

impl MetaData {
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "name" => self.name = value.to_string(),
            "values" => {
                self.values.extend(
                    value
                        .split(|c| c == '\n' || c == ',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_lowercase),
                );
            }
            _ => return false,
        }
        true
    }
}
