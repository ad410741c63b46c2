//! Named semantic validators for event and action format slots.
//!
//! A format such as `player breaks <material>` names a validator in each
//! `<...>` slot. A validator scores how well one word fits, from 0 (no
//! match) to 10 (certain match). `strict` scoring rejects anything that
//! is not a known value.

use crate::parse::pattern::{compile, is_advanced};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Score one word, optionally strictly.
pub type ValidatorFn = Arc<dyn Fn(&str, bool) -> u8 + Send + Sync>;

/// Known data set of lowercased values.
pub type DataSet = Arc<HashSet<String>>;

/// Score for an exact keyword or known value.
pub const EXACT: u8 = 10;
/// Score for an advanced matcher that matches a known value.
pub const MATCHER_HIT: u8 = 8;
/// Lenient score for a user-defined name (worlds, areas).
pub const USER_NAME: u8 = 4;
/// Lenient score for an advanced matcher that matches nothing known.
pub const MATCHER_MISS: u8 = 3;
/// Lenient score for a word containing a tag.
pub const DYNAMIC: u8 = 2;
/// Lenient score for an unknown plain word.
pub const UNKNOWN: u8 = 1;

struct KeywordValidator {
    keywords: &'static [&'static str],
    sets: Vec<DataSet>,
    plain_word: Option<u8>,
}

impl KeywordValidator {
    fn score(&self, word: &str, strict: bool) -> u8 {
        let word = word.to_lowercase();
        if self.keywords.contains(&word.as_str()) || self.sets.iter().any(|s| s.contains(&word)) {
            return EXACT;
        }
        if word.contains('<') {
            return if strict { 0 } else { DYNAMIC };
        }
        if is_advanced(&word) {
            let Ok(matcher) = compile(&word) else {
                return 0;
            };
            let hit = self.keywords.iter().any(|k| matcher.matches(k))
                || self.sets.iter().any(|s| s.iter().any(|v| matcher.matches(v)));
            return match (hit, strict) {
                (true, _) => MATCHER_HIT,
                (false, true) => 0,
                (false, false) => MATCHER_MISS,
            };
        }
        match (self.plain_word, strict) {
            (Some(score), _) => score,
            (None, true) => 0,
            (None, false) => UNKNOWN,
        }
    }
}

struct Builtin {
    name: &'static str,
    keywords: &'static [&'static str],
    sets: &'static [&'static str],
    plain_word: Option<u8>,
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "entity",
        keywords: &["entity", "player", "npc", "vehicle", "projectile", "hanging", "living", "monster", "mob", "animal"],
        sets: &["entity_types"],
        plain_word: None,
    },
    Builtin {
        name: "projectile",
        keywords: &["projectile", "entity", "arrow", "trident", "snowball", "egg", "fireball"],
        sets: &["entity_types"],
        plain_word: None,
    },
    Builtin {
        name: "vehicle",
        keywords: &["vehicle", "entity", "minecart", "boat", "horse", "pig"],
        sets: &["entity_types"],
        plain_word: None,
    },
    Builtin {
        name: "hanging",
        keywords: &["hanging", "entity", "painting", "item_frame", "glow_item_frame", "leash_hitch"],
        sets: &["entity_types"],
        plain_word: None,
    },
    Builtin {
        name: "living",
        keywords: &["living", "entity", "player", "npc", "monster", "mob", "animal"],
        sets: &["entity_types"],
        plain_word: None,
    },
    Builtin {
        name: "material",
        keywords: &["material", "block", "item"],
        sets: &["materials"],
        plain_word: None,
    },
    Builtin {
        name: "block",
        keywords: &["block", "material"],
        sets: &["materials"],
        plain_word: None,
    },
    Builtin {
        name: "item",
        keywords: &["item", "potion"],
        sets: &["materials", "items"],
        plain_word: None,
    },
    Builtin {
        name: "inventory",
        keywords: &["inventory", "notable", "player", "npc", "entity", "location"],
        sets: &["inventory_types"],
        plain_word: None,
    },
    Builtin {
        name: "world",
        keywords: &["world"],
        sets: &["worlds"],
        plain_word: Some(USER_NAME),
    },
    Builtin {
        name: "area",
        keywords: &["area", "cuboid", "ellipsoid", "polygon"],
        sets: &[],
        plain_word: Some(USER_NAME),
    },
    Builtin {
        name: "biome",
        keywords: &["biome"],
        sets: &["biomes"],
        plain_word: None,
    },
    Builtin {
        name: "cause",
        keywords: &["cause"],
        sets: &["damage_causes"],
        plain_word: None,
    },
];

/// Registry of named validators.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, ValidatorFn>,
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl ValidatorRegistry {
    /// Build the built-in validators over the given data sets.
    pub fn with_builtins(data: &HashMap<String, DataSet>) -> Self {
        let mut registry = Self::default();
        for builtin in BUILTINS {
            let validator = KeywordValidator {
                keywords: builtin.keywords,
                sets: builtin.sets.iter().filter_map(|s| data.get(*s).cloned()).collect(),
                plain_word: builtin.plain_word,
            };
            registry.register(builtin.name, Arc::new(move |word: &str, strict: bool| validator.score(word, strict)));
        }
        registry.register("number", Arc::new(score_number));
        registry.register("any", Arc::new(|_: &str, _: bool| UNKNOWN));
        registry
    }

    /// Register (or replace) a validator.
    pub fn register(&mut self, name: &str, validator: ValidatorFn) {
        self.validators.insert(name.to_lowercase(), validator);
    }

    /// Look up a validator by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<ValidatorFn> {
        self.validators.get(&name.to_lowercase()).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn score_number(word: &str, strict: bool) -> u8 {
    if word.parse::<f64>().is_ok() {
        EXACT
    } else if word.contains('<') && !strict {
        DYNAMIC
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ValidatorRegistry {
        let mut data = HashMap::new();
        data.insert(
            "materials".to_string(),
            Arc::new(HashSet::from(["stone".to_string(), "oak_log".to_string()])),
        );
        ValidatorRegistry::with_builtins(&data)
    }

    #[test]
    fn all_builtin_names_present() {
        let registry = registry();
        for name in [
            "entity", "projectile", "vehicle", "hanging", "living", "material", "block", "item",
            "inventory", "world", "area", "biome", "cause", "number", "any",
        ] {
            assert!(registry.get(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn exact_values_and_keywords_score_highest() {
        let material = registry().get("material").unwrap();
        assert_eq!(material("STONE", true), EXACT);
        assert_eq!(material("block", true), EXACT);
    }

    #[test]
    fn matchers_score_by_known_values() {
        let material = registry().get("material").unwrap();
        assert_eq!(material("*_log", true), MATCHER_HIT);
        assert_eq!(material("*_planks", true), 0);
        assert_eq!(material("*_planks", false), MATCHER_MISS);
        assert_eq!(material("regex:(", false), 0);
    }

    #[test]
    fn unknown_and_dynamic_words() {
        let material = registry().get("material").unwrap();
        assert_eq!(material("my_custom_item", true), 0);
        assert_eq!(material("my_custom_item", false), UNKNOWN);
        assert_eq!(material("<[mat]>", false), DYNAMIC);
        assert_eq!(material("<[mat]>", true), 0);
    }

    #[test]
    fn user_named_validators_accept_plain_words() {
        let world = registry().get("world").unwrap();
        assert_eq!(world("survival", true), USER_NAME);
    }

    #[test]
    fn number_and_any() {
        let registry = registry();
        let number = registry.get("number").unwrap();
        assert_eq!(number("1.5", true), EXACT);
        assert_eq!(number("five", false), 0);
        let any = registry.get("any").unwrap();
        assert_eq!(any("whatever", true), UNKNOWN);
    }
}
