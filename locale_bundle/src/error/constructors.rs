//! Constructors for `BundleError` values shared across modules.

use std::sync::Arc;

use figment::Error as FigmentError;

use super::{BoxError, BundleError};
use crate::codec::Format;

impl BundleError {
    /// Construct a decode error for `resource`.
    ///
    /// # Examples
    ///
    /// ```
    /// use locale_bundle::{BundleError, Format};
    /// let err = BundleError::decode("app.json", Format::Json, "trailing comma");
    /// assert!(matches!(&*err, BundleError::Decode { .. }));
    /// ```
    #[must_use]
    pub fn decode(
        resource: impl Into<String>,
        format: Format,
        source: impl Into<BoxError>,
    ) -> Arc<Self> {
        Arc::new(Self::Decode {
            resource: resource.into(),
            format,
            source: source.into(),
        })
    }

    /// Construct a read error for `resource`.
    #[must_use]
    pub fn read(resource: impl Into<String>, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::Read {
            resource: resource.into(),
            source,
        })
    }

    /// Construct an unsupported-format error.
    #[must_use]
    pub fn unsupported_format(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::UnsupportedFormat { name: name.into() })
    }

    /// Construct an unsupported-node error for the node at `path`.
    #[must_use]
    pub fn unsupported_node(path: impl Into<String>, kind: &'static str) -> Arc<Self> {
        Arc::new(Self::UnsupportedNodeKind {
            path: path.into(),
            kind,
        })
    }

    /// Construct a configuration error from a [`figment::Error`].
    #[must_use]
    pub fn config(source: FigmentError) -> Self {
        Self::Config(Box::new(source))
    }

    /// Construct a provider failure.
    #[must_use]
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Provider {
            provider: provider.into(),
            message: message.into(),
        })
    }

    /// Returns `true` for failures that stop a single lookup attempt but leave
    /// the rest of a resolution intact.
    #[must_use]
    pub const fn is_attempt_failure(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Read { .. })
    }
}
