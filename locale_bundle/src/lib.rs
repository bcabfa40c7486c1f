//! Locale-aware message bundles with parent fallback.
//!
//! Messages live in JSON, YAML or Java properties resources named
//! `<bundle>_<locale>.<ext>`. A [`Bundler`] resolves a bundle name and a
//! [`Locale`] into a [`Bundle`] whose lookups fall back from `en_GB` through
//! `en` to the root resource, caching every bundle it builds.
//!
//! ```
//! use std::sync::Arc;
//! use locale_bundle::source::{MemorySource, Source};
//! use locale_bundle::{BundleLoader, Bundler, locale};
//!
//! let source: Arc<dyn Source> = Arc::new(
//!     MemorySource::new("inline")
//!         .with_resource("app.json", r#"{"title": "Shop", "cart": {"empty": "Nothing here"}}"#)
//!         .with_resource("app_en_GB.properties", "title=Shoppe\n"),
//! );
//! let loader = BundleLoader::new().with_namespace("app", [source]);
//! let bundler = Bundler::new(loader);
//!
//! let bundle = bundler.load("app", &locale::of("en_GB"));
//! assert_eq!(bundle.get("title").as_deref(), Some("Shoppe"));
//! assert_eq!(bundle.get("cart.empty").as_deref(), Some("Nothing here"));
//! ```

mod cache;
mod error;
mod localizer;
mod result_ext;

pub mod bundle;
pub mod bundler;
pub mod codec;
pub mod config;
pub mod loader;
pub mod locale;
pub mod source;

pub use bundle::Bundle;
pub use bundler::{BundleProvider, Bundler, BundlerBuilder, NamespaceBinding};
pub use cache::BoundedCache;
pub use codec::Format;
pub use config::BundlerConfig;
pub use error::{BoxError, BundleError};
pub use loader::BundleLoader;
pub use locale::Locale;
pub use localizer::{LocalizationArgs, Localizer, NoOpLocalizer};
pub use result_ext::{BundleResult, BundleResultExt};
pub use unic_langid::{LanguageIdentifier, langid};
