//! Format-neutral document tree produced by every decoder.

use std::borrow::Cow;
use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// A parsed document node.
///
/// Numbers keep the text the decoder produced so integers are never widened
/// into floats on their way to a message string.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Fields in declaration order. Duplicate names are kept; the last wins
    /// once flattened.
    Object(Vec<(String, Node)>),
    /// Elements in document order.
    Array(Vec<Node>),
    /// A string scalar.
    String(String),
    /// A numeric scalar in canonical text form.
    Number(String),
    /// A boolean scalar.
    Bool(bool),
    /// An explicit null.
    Null,
    /// Raw bytes, rendered as standard base64.
    Binary(Vec<u8>),
    /// A decoder-specific scalar carried as text.
    Opaque(String),
    /// Marker for an absent node.
    ///
    /// None of the bundled decoders produce it: JSON, YAML and properties
    /// input always maps onto the other variants. It only appears in trees
    /// built by hand, and flattening such a tree fails with
    /// [`BundleError::UnsupportedNodeKind`](crate::BundleError::UnsupportedNodeKind).
    Missing,
}

impl Node {
    /// Short label for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::Binary(_) => "binary",
            Self::Opaque(_) => "opaque",
            Self::Missing => "missing",
        }
    }

    /// Returns `true` for objects and arrays.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Canonical text of a scalar node; `None` for containers and `Missing`.
    #[must_use]
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::String(text) | Self::Number(text) | Self::Opaque(text) => {
                Some(Cow::Borrowed(text.as_str()))
            }
            Self::Bool(true) => Some(Cow::Borrowed("true")),
            Self::Bool(false) => Some(Cow::Borrowed("false")),
            Self::Null => Some(Cow::Borrowed("null")),
            Self::Binary(bytes) => Some(Cow::Owned(STANDARD.encode(bytes))),
            Self::Object(_) | Self::Array(_) | Self::Missing => None,
        }
    }

    /// Builds a number node from a float, always showing a fraction or exponent.
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::Number(format!("{value:?}"))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a document node")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Node, E> {
        Ok(Node::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Node, E> {
        Ok(Node::Number(value.to_string()))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<Node, E> {
        Ok(Node::Number(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Node, E> {
        Ok(Node::Number(value.to_string()))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Node, E> {
        Ok(Node::Number(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Node, E> {
        Ok(Node::float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Node, E> {
        Ok(Node::String(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Node, E> {
        Ok(Node::String(value))
    }

    fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Node, E> {
        Ok(Node::Binary(value.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, value: Vec<u8>) -> Result<Node, E> {
        Ok(Node::Binary(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Node, D::Error>
    where
        D: Deserializer<'de>,
    {
        Node::deserialize(deserializer)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Node, D::Error>
    where
        D: Deserializer<'de>,
    {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(NodeKey(name)) = map.next_key::<NodeKey>()? {
            let value = map.next_value::<Node>()?;
            fields.push((name, value));
        }
        Ok(Node::Object(fields))
    }
}

/// Object key accepting any scalar, since YAML allows non-string keys.
struct NodeKey(String);

impl<'de> Deserialize<'de> for NodeKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeKeyVisitor)
    }
}

struct NodeKeyVisitor;

impl Visitor<'_> for NodeKeyVisitor {
    type Value = NodeKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<NodeKey, E> {
        Ok(NodeKey(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<NodeKey, E> {
        Ok(NodeKey(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<NodeKey, E> {
        Ok(NodeKey(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<NodeKey, E> {
        Ok(NodeKey(format!("{value:?}")))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<NodeKey, E> {
        Ok(NodeKey(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<NodeKey, E> {
        Ok(NodeKey(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<NodeKey, E> {
        Ok(NodeKey(String::from("null")))
    }

    fn visit_none<E: de::Error>(self) -> Result<NodeKey, E> {
        Ok(NodeKey(String::from("null")))
    }
}
