//! Flat key space produced by the codec and held by bundles.

use std::collections::HashMap;
use std::collections::hash_map;

/// Value stored under a flattened key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageValue {
    /// A single message string.
    Single(String),
    /// The scalar elements of an array, in document order.
    Array(Vec<String>),
}

impl MessageValue {
    /// Returns the string when this is a [`MessageValue::Single`].
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(text) => Some(text),
            Self::Array(_) => None,
        }
    }

    /// Returns the elements when this is a [`MessageValue::Array`].
    #[must_use]
    pub fn as_array(&self) -> Option<&[String]> {
        match self {
            Self::Array(items) => Some(items),
            Self::Single(_) => None,
        }
    }
}

impl From<&str> for MessageValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for MessageValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for MessageValue {
    fn from(value: Vec<String>) -> Self {
        Self::Array(value)
    }
}

/// Mapping from dotted/indexed keys to message values.
///
/// Object nesting joins with `.` and array element `i` appends `[i]`, so the
/// document `{"a": {"b": ["x", {"c": "y"}]}}` yields the keys `a.b`,
/// `a.b[0]` and `a.b[1].c`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatMessages(HashMap<String, MessageValue>);

impl FlatMessages {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MessageValue> {
        self.0.get(key)
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MessageValue>,
    ) -> Option<MessageValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the map holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over every entry in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, MessageValue> {
        self.0.iter()
    }
}

impl IntoIterator for FlatMessages {
    type Item = (String, MessageValue);
    type IntoIter = hash_map::IntoIter<String, MessageValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMessages {
    type Item = (&'a String, &'a MessageValue);
    type IntoIter = hash_map::Iter<'a, String, MessageValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<MessageValue>> FromIterator<(K, V)> for FlatMessages {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
