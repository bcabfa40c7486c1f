//! Decoding of bundle resources into flat message maps.
//!
//! Every supported format is first parsed into the format-neutral [`Node`]
//! tree by its backend library, then [`flatten`] turns that tree into
//! [`FlatMessages`]. Format selection is always by name, never by sniffing
//! the content.

use std::fmt;
use std::io::Read;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::{BundleError, BundleResult};

mod flatten;
mod messages;
mod node;
mod properties;
#[cfg(feature = "yaml")]
mod yaml;

pub use flatten::flatten;
pub use messages::{FlatMessages, MessageValue};
pub use node::Node;

/// Resource formats understood by the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON documents.
    Json,
    /// Java properties files, read as UTF-8.
    Properties,
    /// YAML documents with the `.yml` extension.
    Yml,
    /// YAML documents with the `.yaml` extension.
    Yaml,
}

impl Format {
    /// Every format, in the order resources are probed.
    pub const ALL: [Self; 4] = [Self::Json, Self::Properties, Self::Yml, Self::Yaml];

    /// Canonical format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Properties => "properties",
            Self::Yml => "yml",
            Self::Yaml => "yaml",
        }
    }

    /// File extension used when naming resources of this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        self.name()
    }

    /// Looks up a format by name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::UnsupportedFormat`] for unknown names.
    pub fn from_name(name: &str) -> BundleResult<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| BundleError::unsupported_format(name))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Arc<BundleError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Parses `data` as `format` into a document tree.
///
/// Blank input yields an empty object for every format, so an empty resource
/// produces an empty bundle rather than a root-level scalar.
///
/// # Errors
///
/// Returns [`BundleError::Decode`] when the content is malformed, tagged with
/// `resource` for diagnostics.
pub fn parse(format: Format, data: &[u8], resource: &str) -> BundleResult<Node> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Node::Object(Vec::new()));
    }
    match format {
        Format::Json => {
            serde_json::from_slice(data).map_err(|err| BundleError::decode(resource, format, err))
        }
        Format::Properties => {
            properties::parse(data).map_err(|err| BundleError::decode(resource, format, err))
        }
        Format::Yml | Format::Yaml => parse_yaml(format, data, resource),
    }
}

#[cfg(feature = "yaml")]
fn parse_yaml(format: Format, data: &[u8], resource: &str) -> BundleResult<Node> {
    let text =
        std::str::from_utf8(data).map_err(|err| BundleError::decode(resource, format, err))?;
    yaml::parse(text).map_err(|err| BundleError::decode(resource, format, err))
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(format: Format, _data: &[u8], resource: &str) -> BundleResult<Node> {
    Err(BundleError::decode(
        resource,
        format,
        "yaml feature disabled: enable the 'yaml' feature to support this file format",
    ))
}

/// Reads `reader` to the end and decodes it as `format`.
///
/// # Errors
///
/// Returns [`BundleError::Read`] when reading fails, [`BundleError::Decode`]
/// when parsing fails and [`BundleError::UnsupportedNodeKind`] when the
/// parsed tree cannot be flattened.
pub fn decode(format: Format, mut reader: impl Read, resource: &str) -> BundleResult<FlatMessages> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|err| BundleError::read(resource, err))?;
    decode_bytes(format, &data, resource)
}

/// Decodes an in-memory resource as `format`.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_bytes(format: Format, data: &[u8], resource: &str) -> BundleResult<FlatMessages> {
    let tree = parse(format, data, resource)?;
    let mut flat = FlatMessages::new();
    flatten(&tree, &mut flat)?;
    debug!(resource, %format, keys = flat.len(), "decoded bundle resource");
    Ok(flat)
}
