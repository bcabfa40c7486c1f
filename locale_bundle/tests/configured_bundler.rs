//! Building a bundler from layered configuration.

use anyhow::Result;
use locale_bundle::config::CacheConfig;
use locale_bundle::{Bundler, BundlerConfig, locale};
use rstest::rstest;
use test_helpers::figment::{figment_error, with_jail};

#[rstest]
fn configured_directories_serve_bundles() -> Result<()> {
    let title = with_jail(|jail| {
        jail.create_dir("i18n")?;
        jail.create_dir("i18n/errors")?;
        jail.create_file("i18n/app_en.json", r#"{"title":"Configured"}"#)?;
        jail.create_file("i18n/errors/errors.properties", "not_found=Missing\n")?;
        jail.create_file(
            "bundles.toml",
            r#"
            [[global_sources]]
            directory = "i18n"

            [[namespaces]]
            name = "errors"
            sources = [{ directory = "i18n/errors" }]
            "#,
        )?;
        jail.set_env("LOCALE_BUNDLE_CACHE__MAX_ENTRIES", "16");

        let config = BundlerConfig::load("bundles.toml").map_err(figment_error)?;
        assert_eq!(
            config.cache,
            CacheConfig {
                max_entries: 16,
                ..CacheConfig::default()
            }
        );
        let bundler = Bundler::from_config(&config).map_err(figment_error)?;
        let errors = bundler.load("errors", &locale::of("en"));
        assert_eq!(errors.get("not_found").as_deref(), Some("Missing"));
        Ok(bundler.load("app", &locale::of("en_US")).get("title"))
    })?;
    assert_eq!(title.as_deref(), Some("Configured"));
    Ok(())
}

#[rstest]
fn missing_configured_directory_fails_construction() -> Result<()> {
    let outcome = with_jail(|jail| {
        jail.create_file("bundles.toml", "[[global_sources]]\ndirectory = \"nowhere\"\n")?;
        let config = BundlerConfig::load("bundles.toml").map_err(figment_error)?;
        Ok(Bundler::from_config(&config).is_err())
    })?;
    assert!(outcome);
    Ok(())
}
