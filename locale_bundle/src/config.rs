//! Serde-described bundler configuration loaded through `figment`.
//!
//! Values are layered in order of increasing precedence: built-in defaults,
//! an optional TOML file, then environment variables prefixed with
//! `LOCALE_BUNDLE_`. Nested keys are separated by `__`, so
//! `LOCALE_BUNDLE_CACHE__TTL_SECS=30` sets `cache.ttl_secs`.
//!
//! ```toml
//! [cache]
//! ttl_secs = 300
//! max_entries = 128
//!
//! [[global_sources]]
//! directory = "i18n"
//!
//! [[namespaces]]
//! name = "errors"
//! sources = [{ directory = "i18n/errors" }]
//! ```

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::{BundleResult, BundleResultExt};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "LOCALE_BUNDLE_";

/// Default idle lifetime of a cached bundle, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 10 * 60;

/// Default maximum number of cached bundles.
pub const DEFAULT_MAX_ENTRIES: usize = 512;

/// Top-level configuration for a [`Bundler`](crate::Bundler).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlerConfig {
    /// Bundle cache bounds.
    pub cache: CacheConfig,
    /// Sources searched for every bundle name.
    pub global_sources: Vec<SourceConfig>,
    /// Sources bound to specific bundle names.
    pub namespaces: Vec<NamespaceConfig>,
}

/// Bounds applied to the bundle cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds an unused bundle stays cached.
    pub ttl_secs: u64,
    /// Maximum number of cached bundles.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Idle lifetime as a [`Duration`].
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// A directory of bundle resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding files named `<bundle>_<locale>.<ext>`.
    pub directory: Utf8PathBuf,
}

/// Sources bound to one bundle name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Bundle name the sources serve.
    pub name: String,
    /// Directories searched before the global sources.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl BundlerConfig {
    /// Figment layering defaults, `path` (when given) and the environment.
    #[must_use]
    pub fn figment(path: Option<&Utf8Path>) -> Figment {
        let mut layered = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = path {
            layered = layered.merge(Toml::file(file.as_std_path()));
        }
        layered.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from `path` and the environment.
    ///
    /// A missing file contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Config`](crate::BundleError::Config) when the
    /// layered values do not describe a valid configuration.
    pub fn load(path: impl AsRef<Utf8Path>) -> BundleResult<Self> {
        Self::figment(Some(path.as_ref())).extract().into_bundle()
    }

    /// Loads configuration from defaults and the environment only.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Config`](crate::BundleError::Config) when an
    /// environment override has the wrong type.
    pub fn from_env() -> BundleResult<Self> {
        Self::figment(None).extract().into_bundle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BundleError;
    use figment::Jail;
    use rstest::rstest;
    use test_helpers::figment::{figment_error, with_jail};

    #[rstest]
    fn defaults_apply_without_file_or_env() -> anyhow::Result<()> {
        let config = with_jail(|_| BundlerConfig::load("absent.toml").map_err(figment_error))?;
        assert_eq!(config, BundlerConfig::default());
        assert_eq!(config.cache.ttl(), Duration::from_secs(DEFAULT_TTL_SECS));
        Ok(())
    }

    #[rstest]
    fn file_describes_sources_and_cache() -> anyhow::Result<()> {
        let config = with_jail(|jail| {
            jail.create_file(
                "bundles.toml",
                r#"
                [cache]
                ttl_secs = 30

                [[global_sources]]
                directory = "i18n"

                [[namespaces]]
                name = "errors"
                sources = [{ directory = "i18n/errors" }]
                "#,
            )?;
            BundlerConfig::load("bundles.toml").map_err(figment_error)
        })?;
        assert_eq!(config.cache.ttl_secs, 30);
        assert_eq!(config.cache.max_entries, DEFAULT_MAX_ENTRIES);
        assert_eq!(config.global_sources[..], [SourceConfig { directory: "i18n".into() }]);
        assert_eq!(config.namespaces.len(), 1);
        assert_eq!(config.namespaces[0].name, "errors");
        Ok(())
    }

    #[rstest]
    fn environment_overrides_file() -> anyhow::Result<()> {
        let config = with_jail(|jail| {
            jail.create_file("bundles.toml", "[cache]\nttl_secs = 30\nmax_entries = 8\n")?;
            jail.set_env("LOCALE_BUNDLE_CACHE__MAX_ENTRIES", "3");
            BundlerConfig::load("bundles.toml").map_err(figment_error)
        })?;
        assert_eq!(config.cache.ttl_secs, 30);
        assert_eq!(config.cache.max_entries, 3);
        Ok(())
    }

    #[rstest]
    fn malformed_values_are_config_errors() {
        Jail::expect_with(|jail| {
            jail.set_env("LOCALE_BUNDLE_CACHE__TTL_SECS", "soon");
            let err = BundlerConfig::from_env().expect_err("ttl must be numeric");
            assert!(matches!(&*err, BundleError::Config(_)));
            Ok(())
        });
    }
}
