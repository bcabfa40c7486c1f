//! String lookup behind a small object-safe trait.
//!
//! `Localizer` lets callers ask for a message by identifier without knowing
//! whether it comes from a [`Bundle`], a test double, or nothing at all.
//! Arguments are named Fluent values; a bundle substitutes them into
//! `{name}` placeholders.

use std::collections::HashMap;

use fluent_bundle::FluentValue;

use crate::Bundle;
use crate::bundle::format_message;

/// Arguments forwarded to localisation lookups, keyed by placeholder name.
pub type LocalizationArgs<'value> = HashMap<&'value str, FluentValue<'value>>;

/// Provides localised strings for user-facing output.
///
/// The trait is object-safe so applications can store it behind
/// `Arc<dyn Localizer>`.
pub trait Localizer: Send + Sync {
    /// Performs a localisation lookup for the provided identifier.
    fn lookup(&self, id: &str, args: Option<&LocalizationArgs<'_>>) -> Option<String>;

    /// Resolves the message, returning `fallback` when no translation exists.
    ///
    /// # Examples
    /// ```rust
    /// use locale_bundle::{LocalizationArgs, Localizer};
    ///
    /// struct AlwaysFallback;
    ///
    /// impl Localizer for AlwaysFallback {
    ///     fn lookup(&self, _id: &str, _args: Option<&LocalizationArgs<'_>>) -> Option<String> {
    ///         None
    ///     }
    /// }
    ///
    /// assert_eq!(AlwaysFallback.message("cli.about", None, "fallback"), "fallback");
    /// ```
    fn message(&self, id: &str, args: Option<&LocalizationArgs<'_>>, fallback: &str) -> String {
        self.lookup(id, args).unwrap_or_else(|| fallback.to_owned())
    }
}

/// Localiser that declines to translate anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpLocalizer;

impl NoOpLocalizer {
    /// Creates a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Localizer for NoOpLocalizer {
    fn lookup(&self, _id: &str, _args: Option<&LocalizationArgs<'_>>) -> Option<String> {
        None
    }
}

impl Localizer for Bundle {
    fn lookup(&self, id: &str, args: Option<&LocalizationArgs<'_>>) -> Option<String> {
        let pattern = self.get(id)?;
        match args {
            Some(named) if !named.is_empty() => Some(format_message(&pattern, self.locale(), named)),
            _ => Some(pattern),
        }
    }
}
