//! Byte-stream stores that bundle resources are read from.
//!
//! A [`Source`] maps resource paths such as `messages_en_GB.json` to readable
//! streams. The loader only distinguishes three outcomes: a stream, `Ok(None)`
//! when the resource does not exist, and `Err` when it exists but cannot be
//! opened.

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

mod dir;
mod memory;

pub use dir::DirSource;
pub use memory::MemorySource;

/// Readable stream returned by [`Source::open`].
pub type ResourceReader = Box<dyn Read + Send>;

/// A store of bundle resources.
pub trait Source: Send + Sync + fmt::Debug {
    /// Identity used to de-duplicate registrations.
    fn id(&self) -> SourceId;

    /// Opens `resource`, returning `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the resource exists but cannot be opened.
    fn open(&self, resource: &str) -> io::Result<Option<ResourceReader>>;
}

impl<S: Source + ?Sized> Source for Arc<S> {
    fn id(&self) -> SourceId {
        (**self).id()
    }

    fn open(&self, resource: &str) -> io::Result<Option<ResourceReader>> {
        (**self).open(resource)
    }
}

/// Identity of a [`Source`]: what kind of store it is, which folder it reads
/// from, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId {
    kind: String,
    folder: String,
    provenance: String,
}

impl SourceId {
    /// Builds an identity from its three parts.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        folder: impl Into<String>,
        provenance: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            folder: folder.into(),
            provenance: provenance.into(),
        }
    }

    /// Kind of store, for example `memory` or `dir`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Folder the store resolves resources against.
    #[must_use]
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Free-form origin label.
    #[must_use]
    pub fn provenance(&self) -> &str {
        &self.provenance
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.folder)?;
        if !self.provenance.is_empty() {
            write!(f, " ({})", self.provenance)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
