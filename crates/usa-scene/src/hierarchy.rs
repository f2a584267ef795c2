//! Transform hierarchy
//!
//! Unity stores the scene tree as flat cross-references: every Transform
//! lists its children in `m_Children` and points at its GameObject through
//! `m_GameObject`. [`Hierarchy`] rebuilds the forest from those fields and
//! renders it as an indented listing:
//!
//! ```text
//! Environment
//! --Terrain
//! --Trees
//! ----Oak
//! Player
//! ```

use crate::object::{ClassId, ObjectId, SceneObject};
use crate::registry::ObjectRegistry;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Ordered child list of a Transform
pub const CHILDREN_KEY: &str = "m_Children";

/// Owning GameObject of a Transform
pub const OWNER_KEY: &str = "m_GameObject";

/// Name of a GameObject
pub const NAME_KEY: &str = "m_Name";

/// Display name when no GameObject name can be resolved
pub const UNNAMED: &str = "(unnamed)";

/// Per-level indentation
const INDENT: &str = "--";

/// One visited node of the forest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyEntry<'a> {
    /// Transform identity
    pub id: ObjectId,
    /// Distance from the root (roots are 0)
    pub depth: usize,
    /// Resolved GameObject name or [`UNNAMED`]
    pub name: &'a str,
}

/// Transform forest derived from an object registry
#[derive(Debug, Clone)]
pub struct Hierarchy<'a> {
    transforms: IndexMap<ObjectId, &'a SceneObject>,
    game_objects: HashMap<ObjectId, &'a SceneObject>,
    parent_of: HashMap<ObjectId, ObjectId>,
    children_of: HashMap<ObjectId, Vec<ObjectId>>,
    roots: Vec<ObjectId>,
}

impl<'a> Hierarchy<'a> {
    /// Build the forest from Transform child lists
    #[must_use]
    pub fn build(registry: &'a ObjectRegistry) -> Self {
        let transforms: IndexMap<_, _> = registry
            .of_class(ClassId::Transform)
            .map(|t| (t.id(), t))
            .collect();
        let game_objects: HashMap<_, _> = registry
            .of_class(ClassId::GameObject)
            .map(|g| (g.id(), g))
            .collect();

        let mut parent_of = HashMap::new();
        let mut children_of = HashMap::with_capacity(transforms.len());

        for (&id, transform) in &transforms {
            let children = transform.properties().references(CHILDREN_KEY);
            for &child in &children {
                parent_of.insert(child, id);
            }
            children_of.insert(id, children);
        }

        let roots = transforms
            .keys()
            .filter(|id| !parent_of.contains_key(*id))
            .copied()
            .collect();

        Self {
            transforms,
            game_objects,
            parent_of,
            children_of,
            roots,
        }
    }

    /// Root Transforms in registry order
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    /// Recorded children of a Transform, in source order
    #[must_use]
    pub fn children(&self, id: ObjectId) -> Option<&[ObjectId]> {
        self.children_of.get(&id).map(Vec::as_slice)
    }

    /// Transform whose child list names `id`
    ///
    /// When several lists name the same child, the last one processed wins.
    #[must_use]
    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.parent_of.get(&id).copied()
    }

    /// Number of Transforms in the scene
    #[inline]
    #[must_use]
    pub fn transform_count(&self) -> usize {
        self.transforms.len()
    }

    /// Display name of a Transform
    ///
    /// Follows `m_GameObject` to a GameObject and reads its `m_Name`;
    /// any missing link yields [`UNNAMED`].
    #[must_use]
    pub fn display_name(&self, transform: &SceneObject) -> &'a str {
        transform
            .properties()
            .reference(OWNER_KEY)
            .and_then(|owner| self.game_objects.get(&owner).copied())
            .and_then(|game_object| game_object.properties().text(NAME_KEY))
            .unwrap_or(UNNAMED)
    }

    /// Depth-first pre-order walk from every root
    ///
    /// Identities with no Transform record are skipped along with anything
    /// below them. Each identity is visited at most once, so a cycle or a
    /// child shared by two parents drops the repeated subtree.
    #[must_use]
    pub fn entries(&self) -> Vec<HierarchyEntry<'a>> {
        let mut entries = Vec::with_capacity(self.transforms.len());
        let mut visited = HashSet::with_capacity(self.transforms.len());
        let mut stack: Vec<(ObjectId, usize)> =
            self.roots.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(&transform) = self.transforms.get(&id) else {
                continue;
            };

            if !visited.insert(id) {
                tracing::debug!(%id, "transform already visited, dropping subtree");
                continue;
            }

            entries.push(HierarchyEntry {
                id,
                depth,
                name: self.display_name(transform),
            });

            if let Some(children) = self.children_of.get(&id) {
                stack.extend(children.iter().rev().map(|&child| (child, depth + 1)));
            }
        }

        entries
    }

    /// Indented text listing, one line per visited Transform
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in self.entries() {
            for _ in 0..entry.depth {
                out.push_str(INDENT);
            }
            out.push_str(entry.name);
            out.push('\n');
        }
        out
    }
}
