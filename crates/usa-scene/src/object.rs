//! Scene object identity and classification

use crate::property::PropertyStore;
use std::fmt;

/// Prefix of every record type tag (`!u!4`)
pub const TAG_PREFIX: &str = "!u!";

/// Optional sigil in front of a record identity (`&400000`)
pub const ANCHOR_SIGIL: char = '&';

/// Identity of an object within one scene (Unity `fileID`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub i64);

impl ObjectId {
    /// Parse a header identity token, with or without the anchor sigil
    #[must_use]
    pub fn parse_anchor(token: &str) -> Option<Self> {
        token
            .strip_prefix(ANCHOR_SIGIL)
            .unwrap_or(token)
            .parse()
            .ok()
            .map(Self)
    }

    /// Raw identity value
    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ObjectId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Recognized Unity class ids
///
/// Anything outside this set is [`ClassId::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ClassId {
    /// `!u!1`
    GameObject = 1,
    /// `!u!4`
    Transform = 4,
    /// `!u!20`
    Camera = 20,
    /// `!u!23`
    MeshRenderer = 23,
    /// Unrecognized or malformed tag
    Unknown = -1,
}

impl ClassId {
    /// Numeric class code
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Classifier for a numeric class code
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::GameObject,
            4 => Self::Transform,
            20 => Self::Camera,
            23 => Self::MeshRenderer,
            _ => Self::Unknown,
        }
    }

    /// Classifier for a header tag token such as `!u!4`
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        tag.strip_prefix(TAG_PREFIX)
            .and_then(|code| code.parse::<i32>().ok())
            .map_or(Self::Unknown, Self::from_code)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GameObject => "GameObject",
            Self::Transform => "Transform",
            Self::Camera => "Camera",
            Self::MeshRenderer => "MeshRenderer",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// A single parsed record
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    id: ObjectId,
    class: ClassId,
    properties: PropertyStore,
}

impl SceneObject {
    /// Create object from its parts
    #[inline]
    #[must_use]
    pub fn new(id: ObjectId, class: ClassId, properties: PropertyStore) -> Self {
        Self {
            id,
            class,
            properties,
        }
    }

    /// Object identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Object classifier
    #[inline]
    #[must_use]
    pub fn class(&self) -> ClassId {
        self.class
    }

    /// Typed property access
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// Check classifier
    #[inline]
    #[must_use]
    pub fn is(&self, class: ClassId) -> bool {
        self.class == class
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_from_tag() {
        assert_eq!(ClassId::from_tag("!u!1"), ClassId::GameObject);
        assert_eq!(ClassId::from_tag("!u!4"), ClassId::Transform);
        assert_eq!(ClassId::from_tag("!u!20"), ClassId::Camera);
        assert_eq!(ClassId::from_tag("!u!23"), ClassId::MeshRenderer);
    }

    #[test]
    fn class_from_unrecognized_tag() {
        assert_eq!(ClassId::from_tag("!u!114"), ClassId::Unknown);
        assert_eq!(ClassId::from_tag("!u!abc"), ClassId::Unknown);
        assert_eq!(ClassId::from_tag("!x!4"), ClassId::Unknown);
        assert_eq!(ClassId::from_tag("4"), ClassId::Unknown);
        assert_eq!(ClassId::from_tag(""), ClassId::Unknown);
    }

    #[test]
    fn class_codes() {
        assert_eq!(ClassId::Transform.code(), 4);
        assert_eq!(ClassId::Unknown.code(), -1);
        assert_eq!(ClassId::from_code(-1), ClassId::Unknown);
        assert_eq!(ClassId::from_code(ClassId::Camera.code()), ClassId::Camera);
    }

    #[test]
    fn anchor_parsing() {
        assert_eq!(ObjectId::parse_anchor("&400000"), Some(ObjectId(400_000)));
        assert_eq!(ObjectId::parse_anchor("123"), Some(ObjectId(123)));
        assert_eq!(ObjectId::parse_anchor("&-42"), Some(ObjectId(-42)));
        assert_eq!(ObjectId::parse_anchor("&abc"), None);
        assert_eq!(ObjectId::parse_anchor("&"), None);
    }

    #[test]
    fn object_accessors() {
        let obj = SceneObject::new(ObjectId(7), ClassId::Camera, PropertyStore::new());
        assert_eq!(obj.id(), ObjectId(7));
        assert!(obj.is(ClassId::Camera));
        assert!(!obj.is(ClassId::Transform));
        assert!(obj.properties().is_empty());
        assert_eq!(obj.class().to_string(), "Camera");
    }
}
