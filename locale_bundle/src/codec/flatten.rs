//! Conversion of document trees into the flat key space.

use tracing::trace;

use super::{FlatMessages, MessageValue, Node};
use crate::{BundleError, BundleResult};

/// Flattens `node` into `out`, overwriting keys that already exist.
///
/// Objects contribute `parent.field` paths and array elements `parent[i]`
/// paths, where `i` is the element's position in the original array. An
/// array's own path additionally receives the list of its scalar elements;
/// nested objects and arrays are only reachable through their indexed paths.
///
/// # Errors
///
/// Returns [`BundleError::UnsupportedNodeKind`] when the tree contains a
/// [`Node::Missing`] marker.
///
/// # Examples
///
/// ```
/// use locale_bundle::codec::{FlatMessages, MessageValue, Node, flatten};
///
/// let tree = Node::Object(vec![(
///     "greeting".into(),
///     Node::Array(vec![Node::String("hi".into()), Node::Number("2".into())]),
/// )]);
/// let mut flat = FlatMessages::new();
/// flatten(&tree, &mut flat).expect("tree is flattenable");
/// assert_eq!(flat.get("greeting[1]"), Some(&MessageValue::from("2")));
/// ```
pub fn flatten(node: &Node, out: &mut FlatMessages) -> BundleResult<()> {
    flatten_at(node, "", out)
}

fn flatten_at(node: &Node, path: &str, out: &mut FlatMessages) -> BundleResult<()> {
    match node {
        Node::Object(fields) => {
            for (name, child) in fields {
                flatten_at(child, &field_path(path, name), out)?;
            }
            Ok(())
        }
        Node::Array(items) => flatten_array(items, path, out),
        scalar => {
            let text = scalar_text(scalar, path)?;
            out.insert(path, MessageValue::Single(text));
            Ok(())
        }
    }
}

fn flatten_array(items: &[Node], path: &str, out: &mut FlatMessages) -> BundleResult<()> {
    let mut scalars = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let item_path = format!("{path}[{index}]");
        if item.is_container() {
            flatten_at(item, &item_path, out)?;
            continue;
        }
        let text = scalar_text(item, &item_path)?;
        scalars.push(text.clone());
        out.insert(item_path, MessageValue::Single(text));
    }
    trace!(path, scalars = scalars.len(), "flattened array");
    out.insert(path, MessageValue::Array(scalars));
    Ok(())
}

fn scalar_text(node: &Node, path: &str) -> BundleResult<String> {
    node.scalar_text()
        .map(std::borrow::Cow::into_owned)
        .ok_or_else(|| BundleError::unsupported_node(path, node.kind()))
}

fn field_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_owned()
    } else {
        format!("{prefix}.{field}")
    }
}
