//! Locale values and cached tag conversions.
//!
//! A [`Locale`] is the language/region/variant triple used to address bundle
//! resources. Tags may be written with `_` or `-` delimiters; both spellings
//! resolve to the same value. Conversions consult a static table of common
//! locales first and fall back to a bounded cache of previously parsed tags,
//! so repeated lookups of the same tag do not reparse it.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

use crate::cache::BoundedCache;

mod iso;

use iso::{ISO_3166_1, ISO_639_1, KNOWN_TAGS};

const PARSED_CAPACITY: usize = 256;
const PARSED_TTL: Duration = Duration::from_secs(60 * 60);

static KNOWN: LazyLock<HashMap<&'static str, Locale>> = LazyLock::new(|| {
    KNOWN_TAGS
        .iter()
        .map(|tag| (*tag, parse_tag(tag)))
        .collect()
});

static PARSED: LazyLock<BoundedCache<String, Locale>> =
    LazyLock::new(|| BoundedCache::new(PARSED_CAPACITY, PARSED_TTL));

static RENDERED: LazyLock<BoundedCache<(Locale, char), String>> =
    LazyLock::new(|| BoundedCache::new(PARSED_CAPACITY, PARSED_TTL));

/// Language, region and variant identifying a set of localised resources.
///
/// Language is stored lower-case and region upper-case; the variant is kept
/// as written. The root locale has every part empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    region: String,
    variant: String,
}

impl Locale {
    /// The root locale, ancestor of every other locale.
    pub const ROOT: Self = Self {
        language: String::new(),
        region: String::new(),
        variant: String::new(),
    };

    /// Builds a locale from its parts, normalising case.
    #[must_use]
    pub fn new(
        language: impl AsRef<str>,
        region: impl AsRef<str>,
        variant: impl Into<String>,
    ) -> Self {
        Self {
            language: language.as_ref().to_ascii_lowercase(),
            region: region.as_ref().to_ascii_uppercase(),
            variant: variant.into(),
        }
    }

    /// Lower-case language code, empty for the root locale.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Upper-case region code, possibly empty.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Variant, possibly empty.
    #[must_use]
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Returns `true` for the root locale.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.language.is_empty() && self.region.is_empty() && self.variant.is_empty()
    }

    /// The next more general locale, or `None` for the root.
    ///
    /// Drops the variant first, then the region, then the language.
    #[must_use]
    pub fn fallback(&self) -> Option<Self> {
        if !self.variant.is_empty() {
            Some(Self {
                variant: String::new(),
                ..self.clone()
            })
        } else if !self.region.is_empty() {
            Some(Self {
                region: String::new(),
                ..self.clone()
            })
        } else if self.language.is_empty() {
            None
        } else {
            Some(Self::ROOT)
        }
    }

    /// Canonical tag using `-` as the delimiter.
    #[must_use]
    pub fn tag(&self) -> String {
        self.tag_with('-')
    }

    /// Tag rendered with an arbitrary delimiter, omitting empty parts.
    #[must_use]
    pub fn tag_with(&self, delimiter: char) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        for part in [&self.language, &self.region, &self.variant] {
            if !part.is_empty() {
                parts.push(part);
            }
        }
        parts.join(&delimiter.to_string())
    }

    /// Converts to a [`LanguageIdentifier`] when the locale is valid BCP 47.
    #[must_use]
    pub fn to_language_identifier(&self) -> Option<LanguageIdentifier> {
        LanguageIdentifier::from_str(&self.tag()).ok()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl From<&LanguageIdentifier> for Locale {
    fn from(id: &LanguageIdentifier) -> Self {
        let language = if id.language.is_empty() {
            ""
        } else {
            id.language.as_str()
        };
        let region = id.region.as_ref().map_or("", |region| region.as_str());
        let variant = id
            .variants()
            .map(|variant| variant.as_str())
            .collect::<Vec<_>>()
            .join("_");
        Self::new(language, region, variant)
    }
}

impl From<LanguageIdentifier> for Locale {
    fn from(id: LanguageIdentifier) -> Self {
        Self::from(&id)
    }
}

impl FromStr for Locale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(of(s))
    }
}

/// Resolves a tag such as `en_GB` or `en-GB` into a [`Locale`].
///
/// Parsing never fails: tags that are not valid BCP 47 are split on the
/// delimiter on a best-effort basis so legacy names like `en_US_WIN` still
/// produce a usable locale.
///
/// # Examples
///
/// ```
/// use locale_bundle::locale;
///
/// let gb = locale::of("en_GB");
/// assert_eq!(gb, locale::of("en-GB"));
/// assert_eq!(gb.region(), "GB");
/// assert!(locale::of("").is_root());
/// ```
#[must_use]
pub fn of(tag: &str) -> Locale {
    let normalised = tag.trim().replace('_', "-");
    if normalised.is_empty() {
        return Locale::ROOT;
    }
    if let Some(known) = KNOWN.get(normalised.as_str()) {
        return known.clone();
    }
    if let Some(cached) = PARSED.get(normalised.as_str()) {
        return cached;
    }
    let parsed = parse_tag(&normalised);
    PARSED.insert(normalised, parsed.clone());
    parsed
}

/// Renders `locale` as a `-` delimited tag.
#[must_use]
pub fn to_tag(locale: &Locale) -> String {
    to_tag_with(locale, '-')
}

/// Renders `locale` using `delimiter` between its parts.
///
/// ```
/// use locale_bundle::locale;
///
/// assert_eq!(locale::to_tag_with(&locale::of("en-GB"), '_'), "en_GB");
/// ```
#[must_use]
pub fn to_tag_with(locale: &Locale, delimiter: char) -> String {
    let key = (locale.clone(), delimiter);
    if let Some(cached) = RENDERED.get(&key) {
        return cached;
    }
    let rendered = locale.tag_with(delimiter);
    RENDERED.insert(key, rendered.clone());
    rendered
}

/// Returns `true` when `code` is a two-letter ISO 639-1 language code.
#[must_use]
pub fn is_iso_language(code: &str) -> bool {
    code.len() == 2
        && ISO_639_1
            .binary_search(&code.to_ascii_lowercase().as_str())
            .is_ok()
}

/// Returns `true` when `code` is a two-letter ISO 3166-1 region code.
#[must_use]
pub fn is_iso_country(code: &str) -> bool {
    code.len() == 2
        && ISO_3166_1
            .binary_search(&code.to_ascii_uppercase().as_str())
            .is_ok()
}

// `LanguageIdentifier` lower-cases variants, so the variant is taken from the
// tag as written.
fn parse_tag(tag: &str) -> Locale {
    match LanguageIdentifier::from_str(tag) {
        Ok(id) => Locale {
            variant: split_tag(tag).variant,
            ..Locale::from(&id)
        },
        Err(_) => split_tag(tag),
    }
}

fn is_region_subtag(part: &str) -> bool {
    (part.len() == 2 && part.chars().all(|ch| ch.is_ascii_alphabetic()))
        || (part.len() == 3 && part.chars().all(|ch| ch.is_ascii_digit()))
}

fn is_script_subtag(part: &str) -> bool {
    part.len() == 4 && part.chars().all(|ch| ch.is_ascii_alphabetic())
}

fn split_tag(tag: &str) -> Locale {
    let mut parts = tag.split('-').filter(|part| !part.is_empty()).peekable();
    let language = parts.next().unwrap_or_default();
    if parts.peek().is_some_and(|part| is_script_subtag(part)) {
        parts.next();
    }
    let region = parts.next_if(|part| is_region_subtag(part)).unwrap_or_default();
    let variant = parts.collect::<Vec<_>>().join("_");
    Locale::new(language, region, variant)
}

#[cfg(test)]
mod tests;
