//! Unit tests for locale parsing, rendering and ISO membership checks.

use super::*;
use rstest::rstest;
use unic_langid::langid;

#[rstest]
#[case("en_GB", "en", "GB", "")]
#[case("en-GB", "en", "GB", "")]
#[case("EN-gb", "en", "GB", "")]
#[case("de", "de", "", "")]
#[case("en_US_WIN", "en", "US", "WIN")]
#[case("ca-ES-valencia", "ca", "ES", "valencia")]
#[case("es-419", "es", "419", "")]
#[case("de_DE_POSIX", "de", "DE", "POSIX")]
#[case("sl-IT-Rozaj", "sl", "IT", "Rozaj")]
fn parses_tags(
    #[case] tag: &str,
    #[case] language: &str,
    #[case] region: &str,
    #[case] variant: &str,
) {
    let locale = of(tag);
    assert_eq!(locale.language(), language, "language of {tag}");
    assert_eq!(locale.region(), region, "region of {tag}");
    assert_eq!(locale.variant(), variant, "variant of {tag}");
}

#[rstest]
#[case("")]
#[case("  ")]
#[case("und")]
fn blank_and_undetermined_tags_are_root(#[case] tag: &str) {
    assert!(of(tag).is_root(), "{tag:?} should be root");
}

#[rstest]
fn script_subtags_are_dropped() {
    let locale = of("zh-Hant-TW");
    assert_eq!(locale, Locale::new("zh", "TW", ""));
}

#[rstest]
fn repeated_lookups_return_equal_values() {
    let first = of("xx_YY_legacy");
    let second = of("xx-YY-legacy");
    assert_eq!(first, second);
}

#[rstest]
#[case(Locale::new("en", "GB", ""), '-', "en-GB")]
#[case(Locale::new("en", "GB", ""), '_', "en_GB")]
#[case(Locale::new("en", "", ""), '_', "en")]
#[case(Locale::new("en", "US", "WIN"), '_', "en_US_WIN")]
#[case(Locale::ROOT, '_', "")]
fn renders_tags(#[case] locale: Locale, #[case] delimiter: char, #[case] expected: &str) {
    assert_eq!(to_tag_with(&locale, delimiter), expected);
}

#[rstest]
fn fallback_walks_to_root() {
    let mut current = Some(Locale::new("en", "US", "WIN"));
    let mut seen = Vec::new();
    while let Some(locale) = current {
        seen.push(locale.tag());
        current = locale.fallback();
    }
    assert_eq!(seen, vec!["en-US-WIN", "en-US", "en", ""]);
}

#[rstest]
fn converts_from_language_identifier() {
    let locale = Locale::from(langid!("pt-BR"));
    assert_eq!(locale, of("pt_BR"));
    assert_eq!(locale.to_language_identifier(), Some(langid!("pt-BR")));
}

#[rstest]
#[case("en", true)]
#[case("EN", true)]
#[case("iw", true)]
#[case("eng", false)]
#[case("xx", false)]
#[case("", false)]
fn checks_iso_languages(#[case] code: &str, #[case] expected: bool) {
    assert_eq!(is_iso_language(code), expected);
}

#[rstest]
#[case("GB", true)]
#[case("gb", true)]
#[case("UK", false)]
#[case("GBR", false)]
fn checks_iso_countries(#[case] code: &str, #[case] expected: bool) {
    assert_eq!(is_iso_country(code), expected);
}

#[rstest]
fn iso_tables_are_sorted() {
    assert!(ISO_639_1.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(ISO_3166_1.windows(2).all(|pair| pair[0] < pair[1]));
}
