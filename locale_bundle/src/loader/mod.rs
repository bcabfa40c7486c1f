//! Locates and decodes bundle resources for a single locale.
//!
//! The [`BundleLoader`] keeps a registry of [`Source`] sets: one per
//! namespace plus a global set used when a namespace has nothing to offer.
//! Each load probes every source with every known [`Format`] and decodes the
//! first resource that exists.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::codec::{self, FlatMessages, Format};
use crate::config::{BundlerConfig, SourceConfig};
use crate::locale::{self, Locale};
use crate::source::{DirSource, Source, SourceId};
use crate::{Bundle, BundleError, BundleResult};

/// Shared handle to a registered source.
pub type SharedSource = Arc<dyn Source>;

/// Fully qualified bundle name for `name` in `locale`.
///
/// The root locale keeps the bare name; other locales append their tag with
/// `_` delimiters.
///
/// ```
/// use locale_bundle::{Locale, locale, loader::bundle_name};
///
/// assert_eq!(bundle_name("messages", &Locale::ROOT), "messages");
/// assert_eq!(bundle_name("messages", &locale::of("en-GB")), "messages_en_GB");
/// ```
#[must_use]
pub fn bundle_name(name: &str, locale: &Locale) -> String {
    if locale.is_root() {
        return name.to_owned();
    }
    format!("{name}_{}", locale::to_tag_with(locale, '_'))
}

/// Resource path probed for `bundle_name` in `format`.
#[must_use]
pub fn resource_name(bundle_name: &str, format: Format) -> String {
    format!("{bundle_name}.{}", format.extension())
}

/// Registry of sources and the per-locale loading logic.
///
/// Registration is additive: sources registered under an existing namespace
/// are appended, and a source whose [`SourceId`] is already present is
/// ignored.
#[derive(Default)]
pub struct BundleLoader {
    namespaces: RwLock<HashMap<String, Vec<SharedSource>>>,
    global: RwLock<Vec<SharedSource>>,
    candidates: DashMap<Locale, Arc<[Locale]>>,
}

impl BundleLoader {
    /// Creates a loader with no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a loader from the directory sources named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Read`] when a configured directory cannot be
    /// opened.
    pub fn from_config(config: &BundlerConfig) -> BundleResult<Self> {
        let loader = Self::new();
        loader.register_global(open_all(&config.global_sources)?);
        for namespace in &config.namespaces {
            loader.register(&namespace.name, open_all(&namespace.sources)?);
        }
        Ok(loader)
    }

    /// Adds `sources` to `namespace`.
    pub fn register<I>(&self, namespace: &str, sources: I)
    where
        I: IntoIterator<Item = SharedSource>,
    {
        let mut registry = self.namespaces.write();
        let set = registry.entry(namespace.to_owned()).or_default();
        let added = extend_unique(set, sources);
        debug!(namespace, added, total = set.len(), "registered bundle sources");
    }

    /// Adds `sources` to the global fallback set.
    pub fn register_global<I>(&self, sources: I)
    where
        I: IntoIterator<Item = SharedSource>,
    {
        let mut set = self.global.write();
        let added = extend_unique(&mut set, sources);
        debug!(added, total = set.len(), "registered global bundle sources");
    }

    /// Registers `sources` under `namespace` and returns the loader.
    #[must_use]
    pub fn with_namespace<I>(self, namespace: &str, sources: I) -> Self
    where
        I: IntoIterator<Item = SharedSource>,
    {
        self.register(namespace, sources);
        self
    }

    /// Registers global `sources` and returns the loader.
    #[must_use]
    pub fn with_global<I>(self, sources: I) -> Self
    where
        I: IntoIterator<Item = SharedSource>,
    {
        self.register_global(sources);
        self
    }

    /// Identities of the sources registered for `namespace`, in search order.
    #[must_use]
    pub fn namespace_sources(&self, namespace: &str) -> Vec<SourceId> {
        self.namespaces
            .read()
            .get(namespace)
            .map(|set| set.iter().map(|source| source.id()).collect())
            .unwrap_or_default()
    }

    /// Identities of the global sources, in search order.
    #[must_use]
    pub fn global_sources(&self) -> Vec<SourceId> {
        self.global.read().iter().map(|source| source.id()).collect()
    }

    /// Locales to load for `locale`, ordered from the root to `locale`.
    ///
    /// The chain drops the variant, then the region, then the language. The
    /// result is memoised per locale.
    ///
    /// ```
    /// use locale_bundle::{BundleLoader, locale};
    ///
    /// let loader = BundleLoader::new();
    /// let chain = loader.candidate_locales("app", &locale::of("en_GB"));
    /// let tags: Vec<String> = chain.iter().map(|l| l.tag()).collect();
    /// assert_eq!(tags, ["", "en", "en-GB"]);
    /// ```
    #[must_use]
    pub fn candidate_locales(&self, name: &str, locale: &Locale) -> Arc<[Locale]> {
        if let Some(chain) = self.candidates.get(locale) {
            return Arc::clone(chain.value());
        }
        let mut chain: Vec<Locale> =
            std::iter::successors(Some(locale.clone()), Locale::fallback).collect();
        chain.reverse();
        trace!(bundle = name, locale = %locale, depth = chain.len(), "computed candidate locales");
        let shared: Arc<[Locale]> = chain.into();
        self.candidates
            .entry(locale.clone())
            .or_insert_with(|| Arc::clone(&shared));
        shared
    }

    /// Loads the bundle `name` for exactly `locale`, parented to `parent`.
    ///
    /// Sources registered for `name` are searched first, then the global set.
    /// A missing resource moves the search on to the next format and source;
    /// nothing found anywhere yields [`Bundle::empty`].
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Read`] or [`BundleError::Decode`] as soon as a
    /// resource exists but cannot be read or parsed. No further formats or
    /// sources are tried for that locale.
    pub fn load(&self, name: &str, locale: &Locale, parent: Bundle) -> BundleResult<Bundle> {
        let target = bundle_name(name, locale);
        let namespace_set = self.namespaces.read().get(name).cloned().unwrap_or_default();
        let mut found = search(&namespace_set, &target)?;
        if found.is_none() {
            let global_set = self.global.read().clone();
            found = search(&global_set, &target)?;
        }
        let Some((messages, origin)) = found else {
            debug!(bundle = %target, "no resource for bundle");
            return Ok(Bundle::empty());
        };
        debug!(bundle = %target, source = %origin, entries = messages.len(), "loaded bundle");
        Ok(Bundle::new(messages, locale.clone(), parent))
    }
}

impl fmt::Debug for BundleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let namespaces: Vec<String> = self.namespaces.read().keys().cloned().collect();
        f.debug_struct("BundleLoader")
            .field("namespaces", &namespaces)
            .field("global", &self.global_sources())
            .finish_non_exhaustive()
    }
}

fn extend_unique<I>(set: &mut Vec<SharedSource>, sources: I) -> usize
where
    I: IntoIterator<Item = SharedSource>,
{
    let before = set.len();
    for source in sources {
        let id = source.id();
        if set.iter().all(|existing| existing.id() != id) {
            set.push(source);
        }
    }
    set.len() - before
}

fn search(sources: &[SharedSource], target: &str) -> BundleResult<Option<(FlatMessages, SourceId)>> {
    for source in sources {
        for format in Format::ALL {
            let resource = resource_name(target, format);
            trace!(source = %source.id(), resource = %resource, "probing resource");
            let reader = match source.open(&resource) {
                Ok(Some(reader)) => reader,
                Ok(None) => continue,
                Err(err) => return Err(BundleError::read(resource, err)),
            };
            let messages = codec::decode(format, reader, &resource)?;
            return Ok(Some((messages, source.id())));
        }
    }
    Ok(None)
}

fn open_all(configs: &[SourceConfig]) -> BundleResult<Vec<SharedSource>> {
    configs
        .iter()
        .map(|config| {
            DirSource::open(&config.directory)
                .map(|source| Arc::new(source) as SharedSource)
                .map_err(|err| BundleError::read(config.directory.as_str(), err))
        })
        .collect()
}
