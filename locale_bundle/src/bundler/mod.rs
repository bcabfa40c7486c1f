//! Top-level bundle resolution with caching and locale fallback.
//!
//! A [`Bundler`] answers `load(name, locale)` by checking its cache, then
//! asking registered [`BundleProvider`]s, and finally walking the candidate
//! locale chain from the root to the requested locale through its
//! [`BundleLoader`]. Every bundle reached along the way is cached under its
//! own bundle name so later requests for related locales reuse it.
//!
//! There is no process-wide instance: build one, wrap it in an [`Arc`] and
//! share it.
//!
//! [`Arc`]: std::sync::Arc

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::cache::BoundedCache;
use crate::config::{BundlerConfig, DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};
use crate::loader::{BundleLoader, bundle_name};
use crate::{Bundle, BundleResult, Locale};

mod provider;

pub use provider::BundleProvider;

/// Binds a type to the bundle name it reads messages from.
///
/// Types without a binding keep the default `None`, and
/// [`Bundler::load_for`] answers them with [`Bundle::empty`].
///
/// ```
/// use locale_bundle::NamespaceBinding;
///
/// struct CheckoutPage;
///
/// impl NamespaceBinding for CheckoutPage {
///     const NAMESPACE: Option<&'static str> = Some("checkout");
/// }
/// ```
pub trait NamespaceBinding {
    /// Bundle name used for this type.
    const NAMESPACE: Option<&'static str> = None;
}

/// Resolves, caches and serves bundles.
pub struct Bundler {
    loader: Arc<BundleLoader>,
    providers: Vec<Arc<dyn BundleProvider>>,
    cache: BoundedCache<String, Bundle>,
}

/// Builds a [`Bundler`].
#[must_use]
pub struct BundlerBuilder {
    loader: Option<Arc<BundleLoader>>,
    providers: Vec<Arc<dyn BundleProvider>>,
    ttl: Duration,
    capacity: usize,
}

impl BundlerBuilder {
    fn new() -> Self {
        Self {
            loader: None,
            providers: Vec::new(),
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            capacity: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Uses `loader` for source-based resolution.
    pub fn with_loader(mut self, loader: impl Into<Arc<BundleLoader>>) -> Self {
        self.loader = Some(loader.into());
        self
    }

    /// Appends a provider consulted before the loader.
    pub fn with_provider(mut self, provider: impl BundleProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Appends an already shared provider.
    pub fn with_shared_provider(mut self, provider: Arc<dyn BundleProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Sets how long an unused bundle stays cached.
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the maximum number of cached bundles.
    pub const fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Finishes the bundler. Without a loader every source lookup finds
    /// nothing, leaving providers as the only origin of bundles.
    pub fn build(self) -> Bundler {
        Bundler {
            loader: self.loader.unwrap_or_default(),
            providers: self.providers,
            cache: BoundedCache::new(self.capacity, self.ttl),
        }
    }
}

impl Bundler {
    /// Starts building a bundler.
    pub fn builder() -> BundlerBuilder {
        BundlerBuilder::new()
    }

    /// Creates a bundler around `loader` with default cache bounds.
    #[must_use]
    pub fn new(loader: impl Into<Arc<BundleLoader>>) -> Self {
        Self::builder().with_loader(loader).build()
    }

    /// Creates a bundler from configuration, opening every configured
    /// directory source.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Read`](crate::BundleError::Read) when a
    /// configured directory cannot be opened.
    pub fn from_config(config: &BundlerConfig) -> BundleResult<Self> {
        let loader = BundleLoader::from_config(config)?;
        Ok(Self::builder()
            .with_loader(loader)
            .with_cache_ttl(config.cache.ttl())
            .with_cache_capacity(config.cache.max_entries)
            .build())
    }

    /// Loader used for source-based resolution.
    #[must_use]
    pub fn loader(&self) -> &BundleLoader {
        &self.loader
    }

    /// Returns the bundle `name` for `locale`, using cached bundles where
    /// possible.
    ///
    /// Resolution never fails: locales whose resources cannot be read are
    /// skipped and the most specific bundle reached is returned, or
    /// [`Bundle::empty`] when nothing was found. That outcome is cached under
    /// the requested locale too, so a changed source is only seen again after
    /// [`Bundler::reload`], [`Bundler::invalidate`] or expiry.
    #[must_use]
    pub fn load(&self, name: &str, locale: &Locale) -> Bundle {
        self.resolve(name, locale, false)
    }

    /// Resolves `name` for `locale` afresh, replacing cached bundles for
    /// every locale in the chain.
    #[must_use]
    pub fn reload(&self, name: &str, locale: &Locale) -> Bundle {
        self.resolve(name, locale, true)
    }

    /// Loads the bundle bound to `T`, or [`Bundle::empty`] when `T` has no
    /// binding.
    #[must_use]
    pub fn load_for<T: NamespaceBinding + ?Sized>(&self, locale: &Locale) -> Bundle {
        T::NAMESPACE.map_or_else(Bundle::empty, |name| self.load(name, locale))
    }

    /// Drops the cached bundle for exactly `name` in `locale`.
    ///
    /// Returns `true` when an entry was removed.
    pub fn invalidate(&self, name: &str, locale: &Locale) -> bool {
        self.cache.remove(&bundle_name(name, locale)).is_some()
    }

    /// Drops every cached bundle.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of bundles currently cached.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn resolve(&self, name: &str, locale: &Locale, refresh: bool) -> Bundle {
        let key = bundle_name(name, locale);
        if !refresh && let Some(hit) = self.cache.get(key.as_str()) {
            debug!(bundle = %key, "bundle cache hit");
            return hit;
        }
        debug!(bundle = %key, refresh, "bundle cache miss");
        if let Some(supplied) = self.ask_providers(name, locale) {
            self.cache_chain(name, key, &supplied);
            return supplied;
        }
        self.walk(name, locale, refresh)
    }

    fn ask_providers(&self, name: &str, locale: &Locale) -> Option<Bundle> {
        self.providers
            .iter()
            .find_map(|provider| provider::consult(provider.as_ref(), name, locale))
    }

    fn cache_chain(&self, name: &str, key: String, supplied: &Bundle) {
        self.cache.insert(key, supplied.clone());
        let mut ancestor = supplied.parent();
        while !ancestor.is_empty() {
            self.cache
                .insert(bundle_name(name, ancestor.locale()), ancestor.clone());
            ancestor = ancestor.parent();
        }
    }

    // The chain ends with the requested locale. Every candidate's key ends up
    // holding the nearest bundle reached for it, including keys whose own
    // resource is missing or broken, so repeat loads of a fallback locale never
    // touch a source again.
    fn walk(&self, name: &str, locale: &Locale, refresh: bool) -> Bundle {
        let mut reached = Bundle::empty();
        for candidate in self.loader.candidate_locales(name, locale).iter() {
            let candidate_key = bundle_name(name, candidate);
            if !refresh && let Some(cached) = self.cache.get(candidate_key.as_str()) {
                trace!(bundle = %candidate_key, "reusing cached ancestor");
                reached = cached;
                continue;
            }
            match self.loader.load(name, candidate, reached.clone()) {
                Ok(bundle) if bundle.is_empty() => {
                    trace!(bundle = %candidate_key, "no bundle for locale");
                }
                Ok(bundle) => reached = bundle,
                Err(err) => {
                    warn!(bundle = %candidate_key, error = %err, "skipping locale after load failure");
                }
            }
            self.cache.insert(candidate_key, reached.clone());
        }
        reached
    }
}

impl fmt::Debug for Bundler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers: Vec<&str> = self.providers.iter().map(|provider| provider.name()).collect();
        f.debug_struct("Bundler")
            .field("loader", &self.loader)
            .field("providers", &providers)
            .field("cache", &self.cache)
            .finish()
    }
}
