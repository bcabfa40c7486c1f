//! YAML decoding backed by `serde-saphyr`.

use serde_saphyr::Options;

use super::Node;

/// Parse YAML contents into a [`Node`] using strict boolean semantics, so
/// `yes` and `on` remain strings.
pub(super) fn parse(contents: &str) -> Result<Node, serde_saphyr::Error> {
    serde_saphyr::from_str_with_options(
        contents,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
}
