//! Primary error enum for bundle resolution flows.

use figment::Error as FigmentError;
use thiserror::Error;

use crate::codec::Format;

/// Boxed error accepted from collaborators such as sources and providers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while loading message bundles.
///
/// A resource that simply does not exist is not an error: sources report it as
/// `Ok(None)` and the search moves on. Every variant here stops the attempt
/// that produced it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BundleError {
    /// A resource was found but its contents are malformed for the format.
    #[error("failed to decode '{resource}' as {format}: {source}")]
    Decode {
        /// Resource path handed to the source.
        resource: String,
        /// Format the decoder was asked to parse.
        format: Format,
        /// Parser error reported by the backend.
        #[source]
        source: BoxError,
    },

    /// A resource was found but reading its bytes failed.
    #[error("failed to read '{resource}': {source}")]
    Read {
        /// Resource path handed to the source.
        resource: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The format name is not one of `json`, `properties`, `yml` or `yaml`.
    #[error("unsupported bundle format '{name}'")]
    UnsupportedFormat {
        /// Name supplied by the caller.
        name: String,
    },

    /// The flattening codec met a node it has no rule for.
    #[error("no flattening rule for {kind} node at '{path}'")]
    UnsupportedNodeKind {
        /// Flattened path of the offending node.
        path: String,
        /// Node kind label.
        kind: &'static str,
    },

    /// Configuration could not be extracted.
    #[error("failed to load bundler configuration: {0}")]
    Config(#[from] Box<FigmentError>),

    /// An external bundle provider failed instead of declining.
    #[error("bundle provider '{provider}' failed: {message}")]
    Provider {
        /// Diagnostic name of the provider.
        provider: String,
        /// Failure description or panic payload.
        message: String,
    },
}
