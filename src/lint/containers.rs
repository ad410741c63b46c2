//! Known container types and the keys each one accepts.
//!
//! Key patterns are matched against lowercase keys. A plain name matches
//! that key, `name.*` matches a section called `name` whose every entry
//! has the category's shape, and `*` matches any key not otherwise listed.

/// Keys every container may carry.
pub const ALWAYS_ALLOWED: &[&str] = &["type", "debug", "data"];

/// Expected shape of a container key's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// A single scalar value.
    Value,
    /// A list of scalar values.
    List,
    /// A list of commands.
    Script,
}

impl KeyKind {
    /// Human-readable name used in messages.
    pub fn describe(&self) -> &'static str {
        match self {
            KeyKind::Value => "a single value",
            KeyKind::List => "a list of values",
            KeyKind::Script => "a script (list of commands)",
        }
    }
}

/// How a key was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyShape {
    /// The key is listed by name.
    Direct(KeyKind),
    /// The key is a section whose entries all have this kind (`name.*`).
    SectionOf(KeyKind),
    /// The key is covered by a `*` wildcard. Any shape is accepted.
    Loose(KeyKind),
}

/// Key rules for one container type.
#[derive(Debug, Clone, Copy)]
pub struct ScriptType {
    pub name: &'static str,
    /// Keys that must be present.
    pub required: &'static [&'static str],
    /// Keys that almost always indicate a mistake in this type.
    pub likely_bad: &'static [&'static str],
    pub values: &'static [&'static str],
    pub lists: &'static [&'static str],
    pub scripts: &'static [&'static str],
    /// Whether keys outside the table are reported.
    pub strict: bool,
}

impl ScriptType {
    /// Classify a lowercase key, trying exact names, then section
    /// patterns, then wildcards.
    pub fn classify(&self, key: &str) -> Option<KeyShape> {
        let categories = [
            (self.scripts, KeyKind::Script),
            (self.lists, KeyKind::List),
            (self.values, KeyKind::Value),
        ];
        if let Some((_, kind)) = categories.iter().find(|(keys, _)| keys.contains(&key)) {
            return Some(KeyShape::Direct(*kind));
        }
        let section = format!("{key}.*");
        if let Some((_, kind)) = categories
            .iter()
            .find(|(keys, _)| keys.contains(&section.as_str()))
        {
            return Some(KeyShape::SectionOf(*kind));
        }
        categories
            .iter()
            .find(|(keys, _)| keys.contains(&"*"))
            .map(|(_, kind)| KeyShape::Loose(*kind))
    }

    /// Whether the key is discouraged for this type.
    pub fn is_likely_bad(&self, key: &str) -> bool {
        self.likely_bad.contains(&key)
    }
}

/// Look up a container type by its lowercase name.
pub fn script_type(name: &str) -> Option<&'static ScriptType> {
    SCRIPT_TYPES.iter().find(|t| t.name == name)
}

/// Names of all known container types.
pub fn script_type_names() -> impl Iterator<Item = &'static str> {
    SCRIPT_TYPES.iter().map(|t| t.name)
}

static SCRIPT_TYPES: &[ScriptType] = &[
    ScriptType {
        name: "assignment",
        required: &["actions"],
        likely_bad: &["script", "events"],
        values: &["default constants.*"],
        lists: &["interact scripts"],
        scripts: &["actions.*"],
        strict: true,
    },
    ScriptType {
        name: "book",
        required: &["title", "author", "text"],
        likely_bad: &["script", "events"],
        values: &["title", "author", "signed"],
        lists: &["text"],
        scripts: &[],
        strict: true,
    },
    ScriptType {
        name: "command",
        required: &["name", "description", "usage", "script"],
        likely_bad: &["events"],
        values: &[
            "name",
            "description",
            "usage",
            "permission",
            "permission message",
            "tab completions.*",
        ],
        lists: &["aliases", "allowed help"],
        scripts: &["script", "tab complete"],
        strict: true,
    },
    ScriptType {
        name: "custom",
        required: &[],
        likely_bad: &["script", "events"],
        values: &["inherit", "*"],
        lists: &[],
        scripts: &["tags.*", "mechanisms.*"],
        strict: false,
    },
    ScriptType {
        name: "data",
        required: &[],
        likely_bad: &[],
        values: &["*"],
        lists: &["*"],
        scripts: &[],
        strict: false,
    },
    ScriptType {
        name: "economy",
        required: &[
            "priority",
            "name single",
            "name plural",
            "digits",
            "format",
            "balance",
            "has",
            "withdraw",
            "deposit",
        ],
        likely_bad: &["script", "events"],
        values: &[
            "priority",
            "name single",
            "name plural",
            "digits",
            "format",
            "balance",
            "has",
        ],
        lists: &[],
        scripts: &["withdraw", "deposit"],
        strict: true,
    },
    ScriptType {
        name: "entity",
        required: &["entity_type"],
        likely_bad: &["script", "events"],
        values: &["entity_type", "flags.*", "*"],
        lists: &["*"],
        scripts: &[],
        strict: false,
    },
    ScriptType {
        name: "enchantment",
        required: &["id"],
        likely_bad: &["script", "events"],
        values: &[
            "id",
            "rarity",
            "category",
            "full_name",
            "min_level",
            "max_level",
            "min_cost",
            "max_cost",
            "treasure_only",
            "is_curse",
            "is_tradable",
            "is_discoverable",
            "damage_bonus",
            "damage_protection",
            "is_compatible",
            "can_enchant",
        ],
        lists: &["slots"],
        scripts: &["after attack", "after hurt"],
        strict: true,
    },
    ScriptType {
        name: "format",
        required: &["format"],
        likely_bad: &["script", "events"],
        values: &["format"],
        lists: &[],
        scripts: &[],
        strict: true,
    },
    ScriptType {
        name: "interact",
        required: &["steps"],
        likely_bad: &["script", "events"],
        values: &["*"],
        lists: &[],
        scripts: &[],
        strict: false,
    },
    ScriptType {
        name: "inventory",
        required: &["inventory"],
        likely_bad: &["script", "events"],
        values: &["inventory", "title", "size", "gui", "definitions.*"],
        lists: &["slots"],
        scripts: &["procedural items"],
        strict: true,
    },
    ScriptType {
        name: "item",
        required: &["material"],
        likely_bad: &["script", "events", "name"],
        values: &[
            "material",
            "display name",
            "color",
            "book",
            "no_id",
            "allow in material recipes",
            "mechanisms.*",
            "flags.*",
            "*",
        ],
        lists: &["lore", "enchantments"],
        scripts: &[],
        strict: false,
    },
    ScriptType {
        name: "map",
        required: &[],
        likely_bad: &["script", "events"],
        values: &["original", "display name", "auto update", "contrast", "*"],
        lists: &[],
        scripts: &[],
        strict: false,
    },
    ScriptType {
        name: "procedure",
        required: &["script"],
        likely_bad: &["events"],
        values: &["definitions"],
        lists: &[],
        scripts: &["script", "*"],
        strict: false,
    },
    ScriptType {
        name: "task",
        required: &["script"],
        likely_bad: &["events", "actions", "steps"],
        values: &["definitions", "speed"],
        lists: &[],
        scripts: &["script", "*"],
        strict: false,
    },
    ScriptType {
        name: "world",
        required: &["events"],
        likely_bad: &["script", "actions", "steps"],
        values: &[],
        lists: &[],
        scripts: &["events.*", "*"],
        strict: false,
    },
    ScriptType {
        name: "yaml data",
        required: &[],
        likely_bad: &[],
        values: &["*"],
        lists: &["*"],
        scripts: &[],
        strict: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_type_is_found() {
        for name in [
            "assignment",
            "book",
            "command",
            "custom",
            "data",
            "economy",
            "entity",
            "enchantment",
            "format",
            "interact",
            "inventory",
            "item",
            "map",
            "procedure",
            "task",
            "world",
            "yaml data",
        ] {
            assert!(script_type(name).is_some(), "missing {name}");
        }
        assert_eq!(script_type_names().count(), 17);
        assert!(script_type("nonsense").is_none());
    }

    #[test]
    fn task_requires_script() {
        let task = script_type("task").unwrap();
        assert_eq!(task.required, &["script"]);
        assert_eq!(task.classify("script"), Some(KeyShape::Direct(KeyKind::Script)));
        assert!(task.is_likely_bad("events"));
    }

    #[test]
    fn world_events_are_a_section_of_scripts() {
        let world = script_type("world").unwrap();
        assert_eq!(world.classify("events"), Some(KeyShape::SectionOf(KeyKind::Script)));
        assert_eq!(world.classify("my_sub"), Some(KeyShape::Loose(KeyKind::Script)));
    }

    #[test]
    fn strict_types_reject_unlisted_keys() {
        let book = script_type("book").unwrap();
        assert!(book.strict);
        assert_eq!(book.classify("colour"), None);
        assert_eq!(book.classify("text"), Some(KeyShape::Direct(KeyKind::List)));
    }

    #[test]
    fn exact_names_win_over_wildcards() {
        let item = script_type("item").unwrap();
        assert_eq!(item.classify("lore"), Some(KeyShape::Direct(KeyKind::List)));
        assert_eq!(item.classify("mechanisms"), Some(KeyShape::SectionOf(KeyKind::Value)));
        assert_eq!(item.classify("recipes"), Some(KeyShape::Loose(KeyKind::Value)));
    }
}
