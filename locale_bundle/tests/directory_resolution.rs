//! End-to-end resolution against bundle files on disk.

use std::sync::Arc;

use anyhow::{Result, ensure};
use locale_bundle::source::{DirSource, Source};
use locale_bundle::{BundleLoader, Bundler, Locale, locale};
use rstest::{fixture, rstest};
use test_helpers::locale_tree::LocaleTree;

#[fixture]
fn tree() -> LocaleTree {
    LocaleTree::new()
        .and_then(|tree| {
            tree.with_file(
                "shop.json",
                r#"{"title":"Shop","cart":{"empty":"Your cart is empty","steps":["Review","Pay"]}}"#,
            )
        })
        .and_then(|tree| tree.with_file("shop_en.yaml", "title: Shop (en)\nflags:\n  - yes\n  - 3\n"))
        .and_then(|tree| tree.with_file("shop_de.properties", "title=Laden\ncart.empty=Leer\n"))
        .expect("locale tree fixture")
}

fn bundler_for(tree: &LocaleTree) -> Result<Bundler> {
    let source: Arc<dyn Source> = Arc::new(DirSource::open(tree.root())?);
    Ok(Bundler::new(BundleLoader::new().with_global([source])))
}

#[rstest]
fn leaf_without_resource_resolves_to_nearest_ancestor(tree: LocaleTree) -> Result<()> {
    let bundler = bundler_for(&tree)?;
    let bundle = bundler.load("shop", &locale::of("en_GB"));
    assert_eq!(bundle.locale(), &locale::of("en"));
    assert_eq!(bundle.get("title").as_deref(), Some("Shop (en)"));
    assert_eq!(bundle.get("cart.empty").as_deref(), Some("Your cart is empty"));
    assert_eq!(
        bundle.messages("cart.steps"),
        Some(vec!["Review".to_owned(), "Pay".to_owned()])
    );
    assert_eq!(bundle.get("cart.steps[1]").as_deref(), Some("Pay"));
    Ok(())
}

#[rstest]
fn yaml_keeps_strict_booleans(tree: LocaleTree) -> Result<()> {
    let bundle = bundler_for(&tree)?.load("shop", &locale::of("en"));
    assert_eq!(
        bundle.messages("flags"),
        Some(vec!["yes".to_owned(), "3".to_owned()])
    );
    Ok(())
}

#[rstest]
fn properties_keys_are_verbatim(tree: LocaleTree) -> Result<()> {
    let bundle = bundler_for(&tree)?.load("shop", &locale::of("de-AT"));
    assert_eq!(bundle.locale(), &locale::of("de"));
    assert_eq!(bundle.get("cart.empty").as_deref(), Some("Leer"));
    let keys = bundle.keys();
    ensure!(keys.contains("title") && keys.contains("cart.empty"), "keys: {keys:?}");
    ensure!(!keys.contains("cart.steps"), "array keys must be excluded");
    Ok(())
}

#[rstest]
fn malformed_leaf_degrades_without_error(tree: LocaleTree) -> Result<()> {
    tree.write("shop_fr.json", "{ \"title\": ")?;
    let bundle = bundler_for(&tree)?.load("shop", &locale::of("fr_FR"));
    ensure!(bundle.locale().is_root(), "expected root, got {}", bundle.locale());
    assert_eq!(bundle.get("title").as_deref(), Some("Shop"));
    Ok(())
}

#[rstest]
fn reload_sees_changed_files(tree: LocaleTree) -> Result<()> {
    let bundler = bundler_for(&tree)?;
    assert_eq!(bundler.load("shop", &Locale::ROOT).get("title").as_deref(), Some("Shop"));
    tree.write("shop.json", r#"{"title":"Store"}"#)?;
    assert_eq!(bundler.load("shop", &Locale::ROOT).get("title").as_deref(), Some("Shop"));
    assert_eq!(bundler.reload("shop", &Locale::ROOT).get("title").as_deref(), Some("Store"));
    Ok(())
}

#[rstest]
fn namespace_sources_take_precedence(tree: LocaleTree) -> Result<()> {
    tree.write("overrides/shop.json", r#"{"title":"Override"}"#)?;
    let global: Arc<dyn Source> = Arc::new(DirSource::open(tree.root())?);
    let specific: Arc<dyn Source> = Arc::new(DirSource::open(tree.path("overrides"))?);
    let loader = BundleLoader::new()
        .with_global([global])
        .with_namespace("shop", [specific]);
    let bundler = Bundler::new(loader);

    let root = bundler.load("shop", &Locale::ROOT);
    assert_eq!(root.get("title").as_deref(), Some("Override"));
    assert_eq!(root.get("cart.empty"), None, "namespace hit stops the search");

    let en = bundler.load("shop", &locale::of("en"));
    assert_eq!(en.get("title").as_deref(), Some("Shop (en)"), "global fallback for en");
    Ok(())
}
