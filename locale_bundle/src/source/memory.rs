//! In-memory resource store.

use std::collections::HashMap;
use std::io::{self, Cursor};

use parking_lot::RwLock;

use super::{ResourceReader, Source, SourceId};

/// Resources held in memory, keyed by resource path.
///
/// Resources may be replaced after the source is registered, which makes the
/// store handy for tests and for bundles generated at runtime.
///
/// # Examples
///
/// ```
/// use locale_bundle::source::{MemorySource, Source};
///
/// let source = MemorySource::new("inline").with_resource("app.json", r#"{"hi":"Hello"}"#);
/// assert!(source.open("app.json").expect("open").is_some());
/// assert!(source.open("other.json").expect("open").is_none());
/// ```
#[derive(Debug)]
pub struct MemorySource {
    id: SourceId,
    resources: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemorySource {
    /// Creates an empty store labelled `provenance`.
    #[must_use]
    pub fn new(provenance: impl Into<String>) -> Self {
        Self {
            id: SourceId::new("memory", "", provenance),
            resources: RwLock::default(),
        }
    }

    /// Adds a resource and returns the store.
    #[must_use]
    pub fn with_resource(self, resource: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(resource, data);
        self
    }

    /// Adds or replaces a resource.
    pub fn insert(&self, resource: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.resources.write().insert(resource.into(), data.into());
    }

    /// Removes a resource, returning its bytes.
    pub fn remove(&self, resource: &str) -> Option<Vec<u8>> {
        self.resources.write().remove(resource)
    }
}

impl Source for MemorySource {
    fn id(&self) -> SourceId {
        self.id.clone()
    }

    fn open(&self, resource: &str) -> io::Result<Option<ResourceReader>> {
        let data = self.resources.read().get(resource).cloned();
        Ok(data.map(|bytes| Box::new(Cursor::new(bytes)) as ResourceReader))
    }
}
