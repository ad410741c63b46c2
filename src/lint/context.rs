//! Per-container analysis state.

use std::collections::HashSet;

/// Names a script container has made available so far.
///
/// Created per top-level container. Nested command blocks share it, so a
/// definition made inside an `if` block stays known after the block.
#[derive(Debug, Clone, Default)]
pub struct ScriptCheckContext {
    /// Lowercase container type (`task`, `world`, ...).
    pub container_type: String,
    /// Known definition names.
    pub definitions: HashSet<String>,
    /// Known save-entry names.
    pub saves: HashSet<String>,
    /// Set once definitions can appear without a visible `define`.
    pub defs_unknowable: bool,
    /// Set once save entries can appear without a visible `save:`.
    pub saves_unknowable: bool,
}

impl ScriptCheckContext {
    /// Create an empty context for a container of the given type.
    pub fn new(container_type: impl Into<String>) -> Self {
        Self {
            container_type: container_type.into(),
            ..Default::default()
        }
    }

    /// Register a definition name.
    ///
    /// Names built from tags cannot be known statically and make every
    /// definition unknowable.
    pub fn define(&mut self, name: &str) {
        let name = name.trim().to_lowercase();
        if name.contains('<') {
            self.defs_unknowable = true;
            return;
        }
        // `define a.b 1` creates or extends the map definition `a`.
        let root = name.split('.').next().unwrap_or_default();
        if !root.is_empty() {
            self.definitions.insert(root.to_string());
        }
    }

    /// Register a save-entry name.
    pub fn save(&mut self, name: &str) {
        let name = name.trim().to_lowercase();
        if name.contains('<') {
            self.saves_unknowable = true;
        } else if !name.is_empty() {
            self.saves.insert(name);
        }
    }

    /// Whether `<[name]>` can be trusted to resolve.
    pub fn knows_definition(&self, name: &str) -> bool {
        if self.defs_unknowable {
            return true;
        }
        let name = name.to_lowercase();
        let root = name.split('.').next().unwrap_or_default();
        self.definitions.contains(root)
    }

    /// Whether `<entry[name]>` can be trusted to resolve.
    pub fn knows_save(&self, name: &str) -> bool {
        self.saves_unknowable || self.saves.contains(&name.to_lowercase())
    }
}
