//! Typed property store
//!
//! Record bodies come out of `serde_yaml` as loosely-shaped values. They are
//! converted once into [`PropertyValue`] and read back through accessors
//! that return `None` on any shape mismatch, so a missing or oddly-typed
//! field degrades to absence instead of an error.

use crate::object::ObjectId;
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

/// Key of the numeric field inside a cross-reference mapping
pub const FILE_ID_KEY: &str = "fileID";

/// Leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Empty or `~`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer that fits in `i64`
    Integer(i64),
    /// Any other number
    Float(f64),
    /// String scalar
    Text(String),
}

/// Dynamically-shaped property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Leaf value
    Scalar(Scalar),
    /// Ordered list
    Sequence(Vec<PropertyValue>),
    /// Nested mapping
    Mapping(PropertyStore),
}

impl PropertyValue {
    /// Text scalar content
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Integer scalar, also accepting text that parses as an integer
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Scalar(Scalar::Integer(value)) => Some(*value),
            Self::Scalar(Scalar::Text(text)) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Sequence items
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Nested mapping
    #[must_use]
    pub fn as_mapping(&self) -> Option<&PropertyStore> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Target of a `{fileID: N}` cross-reference
    #[must_use]
    pub fn as_reference(&self) -> Option<ObjectId> {
        self.as_mapping()?
            .get(FILE_ID_KEY)?
            .as_integer()
            .map(ObjectId)
    }

    /// Check for a null scalar
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(flag) => Self::Scalar(Scalar::Bool(flag)),
            Value::Number(number) => Self::Scalar(number_scalar(&number)),
            Value::String(text) => Self::Scalar(Scalar::Text(text)),
            Value::Sequence(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Mapping(PropertyStore::from(map)),
            Value::Tagged(tagged) => {
                let serde_yaml::value::TaggedValue { value, .. } = *tagged;
                Self::from(value)
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        Self::Scalar(Scalar::Text(text.to_string()))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

fn number_scalar(number: &serde_yaml::Number) -> Scalar {
    if let Some(value) = number.as_i64() {
        Scalar::Integer(value)
    } else if let Some(value) = number.as_f64() {
        Scalar::Float(value)
    } else {
        Scalar::Null
    }
}

/// Mapping keys are kept only when they are plain scalars
fn key_text(key: Value) -> Option<String> {
    match key {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Property name → value mapping for one object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyStore {
    entries: IndexMap<String, PropertyValue>,
}

impl PropertyStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Insert value, returning the previous one
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Text scalar for key
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_text()
    }

    /// Integer scalar for key
    #[must_use]
    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_integer()
    }

    /// Single cross-reference for key
    #[must_use]
    pub fn reference(&self, key: &str) -> Option<ObjectId> {
        self.get(key)?.as_reference()
    }

    /// Ordered cross-reference list for key
    ///
    /// Absent keys and non-list values yield an empty list; entries that do
    /// not resolve to an identity are skipped.
    #[must_use]
    pub fn references(&self, key: &str) -> Vec<ObjectId> {
        self.get(key)
            .and_then(PropertyValue::as_sequence)
            .map(|items| items.iter().filter_map(PropertyValue::as_reference).collect())
            .unwrap_or_default()
    }

    /// Number of properties
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for no properties
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Property names in source order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl From<Mapping> for PropertyStore {
    fn from(map: Mapping) -> Self {
        map.into_iter()
            .filter_map(|(key, value)| Some((key_text(key)?, PropertyValue::from(value))))
            .collect()
    }
}

impl From<PropertyStore> for PropertyValue {
    fn from(store: PropertyStore) -> Self {
        Self::Mapping(store)
    }
}

impl FromIterator<(String, PropertyValue)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (String, PropertyValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
