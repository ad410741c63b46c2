//! Object type graph.
//!
//! Object types form a DAG through `base` and `implements` edges. The graph
//! stores those edges as indices and precomputes the reverse `implements`
//! index once, so tracing never walks live back-pointers.

use crate::meta::objects::MetaObjectType;
use std::collections::{BTreeSet, HashMap};

/// Name of the universal root type.
pub const ROOT_TYPE: &str = "objecttag";

/// Index of an object type within a [`TypeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectTypeId(pub usize);

/// One object type with resolved edges and its sub-tag table.
#[derive(Debug, Clone)]
pub struct ObjectTypeNode {
    pub meta: MetaObjectType,
    pub base: Option<ObjectTypeId>,
    pub implements: Vec<ObjectTypeId>,
    /// Dotted sub-tag key (without the type segment) to tag index.
    pub sub_tags: HashMap<String, usize>,
}

/// Index-based object type graph.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    nodes: Vec<ObjectTypeNode>,
    by_name: HashMap<String, ObjectTypeId>,
    by_prefix: HashMap<String, ObjectTypeId>,
    implemented_by: Vec<Vec<ObjectTypeId>>,
}

impl TypeGraph {
    /// Build the graph, resolving edge names to ids.
    ///
    /// Returns the graph and warnings for duplicate names and unknown edges.
    pub fn build(types: Vec<MetaObjectType>) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let mut graph = TypeGraph::default();

        for meta in types {
            let key = meta.name.to_lowercase();
            if graph.by_name.contains_key(&key) {
                warnings.push(format!("Object type '{}' is documented more than once", meta.name));
                continue;
            }
            let id = ObjectTypeId(graph.nodes.len());
            graph.by_name.insert(key, id);
            let prefix = meta.prefix.to_lowercase();
            if !prefix.is_empty() && prefix != "none" {
                graph.by_prefix.entry(prefix).or_insert(id);
            }
            graph.nodes.push(ObjectTypeNode {
                meta,
                base: None,
                implements: Vec::new(),
                sub_tags: HashMap::new(),
            });
        }

        for index in 0..graph.nodes.len() {
            let meta = &graph.nodes[index].meta;
            let base_name = meta.base.to_lowercase();
            let base = if base_name.is_empty() || base_name == "none" {
                None
            } else {
                let found = graph.by_name.get(&base_name).copied();
                if found.is_none() {
                    warnings.push(format!("Object type '{}' has unknown base '{}'", meta.name, meta.base));
                }
                found
            };
            let mut implements = Vec::new();
            for name in &meta.implements {
                match graph.by_name.get(&name.to_lowercase()) {
                    Some(id) => implements.push(*id),
                    None => warnings.push(format!(
                        "Object type '{}' implements unknown type '{}'",
                        meta.name, name
                    )),
                }
            }
            graph.nodes[index].base = base;
            graph.nodes[index].implements = implements;
        }

        graph.implemented_by = vec![Vec::new(); graph.nodes.len()];
        for (index, node) in graph.nodes.iter().enumerate() {
            for target in &node.implements {
                graph.implemented_by[target.0].push(ObjectTypeId(index));
            }
        }

        (graph, warnings)
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no types.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a type by full name (case-insensitive).
    pub fn id(&self, name: &str) -> Option<ObjectTypeId> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    /// Look up a type by full name, name without the `Tag` suffix, or prefix.
    pub fn alias(&self, name: &str) -> Option<ObjectTypeId> {
        let lowered = name.to_lowercase();
        self.by_name
            .get(&lowered)
            .or_else(|| self.by_name.get(&format!("{}tag", lowered)))
            .or_else(|| self.by_prefix.get(&lowered))
            .copied()
    }

    /// The node for an id.
    pub fn node(&self, id: ObjectTypeId) -> &ObjectTypeNode {
        &self.nodes[id.0]
    }

    /// Display name of a type.
    pub fn name(&self, id: ObjectTypeId) -> &str {
        &self.nodes[id.0].meta.name
    }

    /// The universal root type, if documented.
    pub fn root(&self) -> Option<ObjectTypeId> {
        self.id(ROOT_TYPE)
    }

    /// Types that declare implementing `id`.
    pub fn implemented_by(&self, id: ObjectTypeId) -> &[ObjectTypeId] {
        &self.implemented_by[id.0]
    }

    /// Attach a tag to a type's sub-tag table. The first registration wins.
    pub fn attach_tag(&mut self, id: ObjectTypeId, key: String, tag_index: usize) {
        self.nodes[id.0].sub_tags.entry(key).or_insert(tag_index);
    }

    /// Look up a sub-tag on one type.
    pub fn sub_tag(&self, id: ObjectTypeId, key: &str) -> Option<usize> {
        self.nodes[id.0].sub_tags.get(key).copied()
    }

    /// Every type a value of the seed types may be treated as.
    ///
    /// Types implementing a seed are added first (one hop), then base and
    /// `implements` edges are followed transitively. The root type is
    /// always included.
    pub fn closure(&self, seeds: &BTreeSet<ObjectTypeId>) -> BTreeSet<ObjectTypeId> {
        let mut stack: Vec<ObjectTypeId> = seeds.iter().copied().collect();
        for seed in seeds {
            stack.extend(self.implemented_by(*seed).iter().copied());
        }
        let mut result = BTreeSet::new();
        while let Some(id) = stack.pop() {
            if !result.insert(id) {
                continue;
            }
            let node = self.node(id);
            if let Some(base) = node.base {
                stack.push(base);
            }
            stack.extend(node.implements.iter().copied());
        }
        if let Some(root) = self.root() {
            result.insert(root);
        }
        result
    }
}
