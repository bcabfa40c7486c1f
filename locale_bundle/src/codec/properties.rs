//! Java properties decoding backed by `java-properties`.

use java_properties::PropertiesIter;

use super::Node;

/// Parses UTF-8 properties text into an object whose fields are the property
/// keys exactly as written.
///
/// Keys are not split on `.`: a file holding both `button` and
/// `button.tooltip` keeps both entries, and flattening the result yields the
/// original keys unchanged. Later duplicates win.
pub(super) fn parse(data: &[u8]) -> Result<Node, java_properties::PropertiesError> {
    let mut fields = Vec::new();
    PropertiesIter::new_with_encoding(data, encoding_rs::UTF_8)
        .read_into(|key, value| fields.push((key, Node::String(value))))?;
    Ok(Node::Object(fields))
}
