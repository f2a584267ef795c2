//! Per-scene object registry

use crate::object::{ClassId, ObjectId, SceneObject};
use indexmap::IndexMap;

/// Identity → object map for one scene
///
/// Enumeration follows the order in which identities were first inserted.
/// Re-inserting an identity replaces the object but keeps its position, so
/// the order is reproducible for a given input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectRegistry {
    objects: IndexMap<ObjectId, SceneObject>,
}

impl ObjectRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert object, returning the one it replaced
    pub fn insert(&mut self, object: SceneObject) -> Option<SceneObject> {
        self.objects.insert(object.id(), object)
    }

    /// Object by identity
    #[inline]
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Check identity presence
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Number of objects
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check for no objects
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// Objects of one classifier in enumeration order
    pub fn of_class(&self, class: ClassId) -> impl Iterator<Item = &SceneObject> {
        self.iter().filter(move |object| object.is(class))
    }
}

impl FromIterator<SceneObject> for ObjectRegistry {
    fn from_iter<I: IntoIterator<Item = SceneObject>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl Extend<SceneObject> for ObjectRegistry {
    fn extend<I: IntoIterator<Item = SceneObject>>(&mut self, iter: I) {
        for object in iter {
            self.insert(object);
        }
    }
}

impl<'a> IntoIterator for &'a ObjectRegistry {
    type Item = &'a SceneObject;
    type IntoIter = indexmap::map::Values<'a, ObjectId, SceneObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyStore;

    fn object(id: i64, class: ClassId) -> SceneObject {
        SceneObject::new(ObjectId(id), class, PropertyStore::new())
    }

    #[test]
    fn insert_and_lookup() {
        let mut registry = ObjectRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.insert(object(1, ClassId::GameObject)).is_none());
        assert!(registry.insert(object(4, ClassId::Transform)).is_none());

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(ObjectId(4)));
        assert_eq!(registry.get(ObjectId(1)).map(SceneObject::class), Some(ClassId::GameObject));
        assert!(registry.get(ObjectId(99)).is_none());
    }

    #[test]
    fn duplicate_replaces_in_place() {
        let mut registry: ObjectRegistry = [
            object(10, ClassId::Transform),
            object(20, ClassId::Transform),
            object(30, ClassId::Transform),
        ]
        .into_iter()
        .collect();

        let replaced = registry.insert(object(10, ClassId::Camera));
        assert_eq!(replaced.map(|o| o.class()), Some(ClassId::Transform));

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(ObjectId(10)).map(SceneObject::class), Some(ClassId::Camera));
        let ids: Vec<_> = registry.iter().map(SceneObject::id).collect();
        assert_eq!(ids, vec![ObjectId(10), ObjectId(20), ObjectId(30)]);
    }

    #[test]
    fn filter_by_class() {
        let registry: ObjectRegistry = [
            object(1, ClassId::GameObject),
            object(2, ClassId::Transform),
            object(3, ClassId::GameObject),
            object(4, ClassId::Unknown),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = registry.of_class(ClassId::GameObject).map(SceneObject::id).collect();
        assert_eq!(ids, vec![ObjectId(1), ObjectId(3)]);
        assert_eq!(registry.of_class(ClassId::MeshRenderer).count(), 0);
        assert_eq!((&registry).into_iter().count(), 4);
    }
}
