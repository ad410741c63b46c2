//! The documentation model snapshot.
//!
//! [`ModelBuilder`] collects [`MetaObject`]s and builds an immutable
//! [`DocumentationModel`] with every lookup index precomputed. Analyses
//! take a model snapshot explicitly; [`SharedModel`] holds the current
//! snapshot and swaps it atomically when documentation is reloaded.

use crate::analysis::events::{compile_matchers, CouldMatcher};
use crate::meta::loader::LoadedSources;
use crate::meta::objects::{
    MetaAction, MetaCommand, MetaEvent, MetaMechanism, MetaObject, MetaObjectType, MetaTag,
};
use crate::meta::types::TypeGraph;
use crate::meta::validators::{DataSet, ValidatorRegistry};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Switches every event accepts.
pub const GLOBAL_EVENT_SWITCHES: &[&str] = &[
    "cancelled",
    "ignorecancelled",
    "priority",
    "bukkit_priority",
    "server_flagged",
    "enabled",
];

/// Switches every command accepts.
pub const GLOBAL_COMMAND_SWITCHES: &[&str] = &["save", "player", "npc"];

/// Immutable, fully indexed documentation.
#[derive(Debug, Default)]
pub struct DocumentationModel {
    commands: HashMap<String, MetaCommand>,
    tags: Vec<MetaTag>,
    tag_index: HashMap<String, usize>,
    types: TypeGraph,
    mechanisms: HashMap<String, MetaMechanism>,
    mechanisms_by_name: HashMap<String, Vec<String>>,
    events: Vec<MetaEvent>,
    event_matchers: Vec<(usize, CouldMatcher)>,
    actions: Vec<MetaAction>,
    action_matchers: Vec<(usize, CouldMatcher)>,
    data: HashMap<String, DataSet>,
    validators: ValidatorRegistry,
    global_switches: HashSet<String>,
    command_global_switches: HashSet<String>,
    search_index: Vec<(String, MetaObject)>,
    warnings: Vec<String>,
}

impl DocumentationModel {
    /// A model with no documentation.
    pub fn empty() -> Self {
        ModelBuilder::new().build()
    }

    /// Look up a command by name (case-insensitive).
    pub fn command(&self, name: &str) -> Option<&MetaCommand> {
        self.commands.get(&name.to_lowercase())
    }

    /// Number of documented commands.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Look up a tag by normalized dotted key, e.g. `playertag.name`.
    pub fn tag(&self, key: &str) -> Option<&MetaTag> {
        self.tag_index.get(&key.to_lowercase()).map(|i| &self.tags[*i])
    }

    /// Tag by index (as stored in type sub-tag tables).
    pub fn tag_at(&self, index: usize) -> Option<&MetaTag> {
        self.tags.get(index)
    }

    /// Number of documented tags.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Find a tag by text such as `<player.name>` or `PlayerTag.name`.
    ///
    /// Tries the exact key, then the first segment aliased to an object
    /// type by full name, name without `Tag`, or prefix.
    pub fn find_tag(&self, text: &str) -> Option<&MetaTag> {
        let text = text.trim();
        let text = text.strip_prefix('<').unwrap_or(text);
        let text = text.strip_suffix('>').unwrap_or(text);
        let key = crate::parse::tag::parse_tag(text, |_| {})
            .dotted_name()
            .to_lowercase();
        if let Some(tag) = self.tag(&key) {
            return Some(tag);
        }
        let (first, rest) = key.split_once('.')?;
        let id = self.types.alias(first)?;
        let aliased = format!("{}.{}", self.types.name(id).to_lowercase(), rest);
        self.tag(&aliased)
    }

    /// The object type graph.
    pub fn types(&self) -> &TypeGraph {
        &self.types
    }

    /// Look up an object type by full name.
    pub fn object_type(&self, name: &str) -> Option<&MetaObjectType> {
        self.types.id(name).map(|id| &self.types.node(id).meta)
    }

    /// Look up a mechanism by object type and name.
    pub fn mechanism(&self, object: &str, name: &str) -> Option<&MetaMechanism> {
        self.mechanisms
            .get(&format!("{}.{}", object, name).to_lowercase())
    }

    /// Every mechanism with the given name, on any object type.
    pub fn mechanisms_named(&self, name: &str) -> Vec<&MetaMechanism> {
        self.mechanisms_by_name
            .get(&name.to_lowercase())
            .map(|keys| keys.iter().filter_map(|k| self.mechanisms.get(k)).collect())
            .unwrap_or_default()
    }

    /// Number of documented mechanisms.
    pub fn mechanism_count(&self) -> usize {
        self.mechanisms.len()
    }

    /// Documented events.
    pub fn events(&self) -> &[MetaEvent] {
        &self.events
    }

    /// Compiled event matchers, tagged with their event index.
    pub fn event_matchers(&self) -> impl Iterator<Item = (usize, &CouldMatcher)> {
        self.event_matchers.iter().map(|(i, m)| (*i, m))
    }

    /// Documented assignment actions.
    pub fn actions(&self) -> &[MetaAction] {
        &self.actions
    }

    /// Compiled action matchers, tagged with their action index.
    pub fn action_matchers(&self) -> impl Iterator<Item = (usize, &CouldMatcher)> {
        self.action_matchers.iter().map(|(i, m)| (*i, m))
    }

    /// Whether a word is a member of any documented data set.
    pub fn is_data_value(&self, word: &str) -> bool {
        let lowered = word.to_lowercase();
        self.data.values().any(|set| set.contains(&lowered))
    }

    /// A documented data set by name.
    pub fn data_set(&self, name: &str) -> Option<&DataSet> {
        self.data.get(&name.to_lowercase())
    }

    /// Switches every event accepts.
    pub fn global_switches(&self) -> &HashSet<String> {
        &self.global_switches
    }

    /// Switches every command accepts.
    pub fn command_global_switches(&self) -> &HashSet<String> {
        &self.command_global_switches
    }

    /// Named validators for format slots.
    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    /// Objects whose search text contains every whitespace-separated term.
    pub fn search(&self, term: &str) -> Vec<&MetaObject> {
        let terms: Vec<String> = term.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Vec::new();
        }
        self.search_index
            .iter()
            .filter(|(text, _)| terms.iter().all(|t| text.contains(t.as_str())))
            .map(|(_, object)| object)
            .collect()
    }

    /// Problems found while building the model.
    pub fn load_warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Collects documentation objects and builds a [`DocumentationModel`].
#[derive(Debug, Default)]
pub struct ModelBuilder {
    objects: Vec<MetaObject>,
    warnings: Vec<String>,
}

impl ModelBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from loaded sources, keeping their load warnings.
    pub fn from_sources(sources: LoadedSources) -> Self {
        Self {
            objects: sources.objects,
            warnings: sources.warnings,
        }
    }

    /// Add one object.
    pub fn add(&mut self, object: MetaObject) -> &mut Self {
        self.objects.push(object);
        self
    }

    /// Build the immutable model.
    pub fn build(self) -> DocumentationModel {
        let mut warnings = self.warnings;
        let mut commands = HashMap::new();
        let mut tags = Vec::new();
        let mut mechanisms = Vec::new();
        let mut types = Vec::new();
        let mut events = Vec::new();
        let mut actions = Vec::new();
        let mut data: HashMap<String, HashSet<String>> = HashMap::new();
        let mut search_index = Vec::with_capacity(self.objects.len());

        for object in self.objects {
            search_index.push((object.search_text(), object.clone()));
            match object {
                MetaObject::Command(command) => {
                    let key = command.name.to_lowercase();
                    if commands.contains_key(&key) {
                        warnings.push(format!("Command '{}' is documented more than once", command.name));
                    } else {
                        commands.insert(key, command);
                    }
                }
                MetaObject::Tag(tag) => tags.push(tag),
                MetaObject::Event(event) => events.push(event),
                MetaObject::Action(action) => actions.push(action),
                MetaObject::Mechanism(mechanism) => mechanisms.push(mechanism),
                MetaObject::ObjectType(object_type) => types.push(object_type),
                MetaObject::Property(property) => {
                    tags.push(property.to_tag());
                    mechanisms.push(property.to_mechanism());
                }
                MetaObject::Data(set) => {
                    data.entry(set.name.to_lowercase())
                        .or_default()
                        .extend(set.values);
                }
            }
        }

        let data: HashMap<String, DataSet> = data
            .into_iter()
            .map(|(name, values)| (name, Arc::new(values)))
            .collect();

        let (mut graph, type_warnings) = TypeGraph::build(types);
        warnings.extend(type_warnings);

        let mut tag_list: Vec<MetaTag> = Vec::with_capacity(tags.len());
        let mut tag_index = HashMap::new();
        for tag in tags {
            let key = tag.key();
            if key.is_empty() {
                continue;
            }
            if tag_index.contains_key(&key) {
                warnings.push(format!("Tag '{}' is documented more than once", tag.attribute));
                continue;
            }
            let index = tag_list.len();
            if let Some((first, rest)) = key.split_once('.') {
                if let Some(id) = graph.id(first) {
                    graph.attach_tag(id, rest.to_string(), index);
                }
            }
            tag_index.insert(key, index);
            tag_list.push(tag);
        }

        let mut mechanism_map = HashMap::new();
        let mut mechanisms_by_name: HashMap<String, Vec<String>> = HashMap::new();
        for mechanism in mechanisms {
            let key = format!("{}.{}", mechanism.object, mechanism.name).to_lowercase();
            if mechanism_map.contains_key(&key) {
                continue;
            }
            mechanisms_by_name
                .entry(mechanism.name.to_lowercase())
                .or_default()
                .push(key.clone());
            mechanism_map.insert(key, mechanism);
        }

        let validators = ValidatorRegistry::with_builtins(&data);

        let mut event_matchers = Vec::new();
        for (index, event) in events.iter().enumerate() {
            for format in &event.events {
                let compiled = compile_matchers(format, &validators, &mut |message: String| {
                    warnings.push(format!("Event '{}': {}", format, message));
                });
                event_matchers.extend(compiled.into_iter().map(|m| (index, m)));
            }
        }
        let mut action_matchers = Vec::new();
        for (index, action) in actions.iter().enumerate() {
            for format in &action.actions {
                let compiled = compile_matchers(format, &validators, &mut |message: String| {
                    warnings.push(format!("Action '{}': {}", format, message));
                });
                action_matchers.extend(compiled.into_iter().map(|m| (index, m)));
            }
        }

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        tracing::debug!(
            commands = commands.len(),
            tags = tag_list.len(),
            events = events.len(),
            types = graph.len(),
            "Built documentation model"
        );

        DocumentationModel {
            commands,
            tags: tag_list,
            tag_index,
            types: graph,
            mechanisms: mechanism_map,
            mechanisms_by_name,
            events,
            event_matchers,
            actions,
            action_matchers,
            data,
            validators,
            global_switches: GLOBAL_EVENT_SWITCHES.iter().map(|s| s.to_string()).collect(),
            command_global_switches: GLOBAL_COMMAND_SWITCHES.iter().map(|s| s.to_string()).collect(),
            search_index,
            warnings,
        }
    }
}

/// Holder for the current model snapshot.
///
/// Readers take a cheap [`Arc`] snapshot; a reload builds a complete new
/// model and then swaps it in.
#[derive(Debug, Default)]
pub struct SharedModel {
    current: RwLock<Arc<DocumentationModel>>,
}

impl SharedModel {
    /// Wrap an initial model.
    pub fn new(model: DocumentationModel) -> Self {
        Self {
            current: RwLock::new(Arc::new(model)),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<DocumentationModel> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a freshly built model.
    pub fn replace(&self, model: DocumentationModel) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(model);
    }
}
