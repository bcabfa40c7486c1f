//! Locale-scoped message bundles linked into fallback chains.
//!
//! A [`Bundle`] owns the flattened messages for one locale and a handle to
//! the bundle of the next more general locale. Lookups walk the chain until a
//! value is found; values found in an ancestor are copied into the asking
//! bundle so repeat lookups stay local. Every chain ends at [`Bundle::empty`],
//! whose parent is itself and which answers every lookup with nothing.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock};

use dashmap::DashMap;
use fluent_bundle::FluentValue;

use crate::Locale;
use crate::codec::{FlatMessages, MessageValue};

mod format;

pub use format::{ArgumentSource, MessageFormatter, format_message};

static EMPTY: LazyLock<Bundle> = LazyLock::new(|| Bundle {
    inner: Arc::new(Inner {
        messages: DashMap::new(),
        locale: Locale::ROOT,
        parent: None,
        keys: OnceLock::new(),
        is_terminal: true,
    }),
});

struct Inner {
    messages: DashMap<String, MessageValue>,
    locale: Locale,
    parent: Option<Bundle>,
    keys: OnceLock<Arc<BTreeSet<String>>>,
    is_terminal: bool,
}

/// Messages for one locale plus the chain of bundles they fall back to.
///
/// Cloning is cheap and clones share the same messages. A bundle stays valid
/// for as long as any handle to it exists, regardless of cache eviction.
#[derive(Clone)]
pub struct Bundle {
    inner: Arc<Inner>,
}

impl Bundle {
    /// Creates a bundle for `locale` whose lookups fall back to `parent`.
    #[must_use]
    pub fn new(messages: FlatMessages, locale: Locale, parent: Self) -> Self {
        Self {
            inner: Arc::new(Inner {
                messages: messages.into_iter().collect(),
                locale,
                parent: (!parent.is_empty()).then_some(parent),
                keys: OnceLock::new(),
                is_terminal: false,
            }),
        }
    }

    /// The terminal bundle that ends every chain.
    #[must_use]
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// Returns `true` for the terminal bundle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_terminal
    }

    /// Locale whose resources populated this bundle.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.inner.locale
    }

    /// The next bundle in the chain; the terminal bundle is its own parent.
    #[must_use]
    pub fn parent(&self) -> Self {
        self.inner.parent.clone().unwrap_or_else(Self::empty)
    }

    /// Returns `true` when both handles refer to the same bundle.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Looks up a single message, searching ancestors when absent here.
    ///
    /// Keys holding arrays resolve to `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match self.retrieve(key)? {
            MessageValue::Single(text) => Some(text),
            MessageValue::Array(_) => None,
        }
    }

    /// Looks up a message and substitutes `{0}`, `{1}`, … placeholders.
    ///
    /// The pattern is returned untouched when `args` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_bundle::FluentValue;
    /// use locale_bundle::{Bundle, locale};
    /// use locale_bundle::codec::FlatMessages;
    ///
    /// let messages: FlatMessages = [("greet", "Hello {0}")].into_iter().collect();
    /// let bundle = Bundle::new(messages, locale::of("en"), Bundle::empty());
    /// let text = bundle.get_with_args("greet", &[FluentValue::from("Ada")]);
    /// assert_eq!(text.as_deref(), Some("Hello Ada"));
    /// ```
    #[must_use]
    pub fn get_with_args(&self, key: &str, args: &[FluentValue<'_>]) -> Option<String> {
        let pattern = self.get(key)?;
        if args.is_empty() {
            return Some(pattern);
        }
        Some(format_message(&pattern, self.locale(), args))
    }

    /// Looks up an array of messages, searching ancestors when absent here.
    ///
    /// Keys holding a single string resolve to `None`.
    #[must_use]
    pub fn messages(&self, key: &str) -> Option<Vec<String>> {
        match self.retrieve(key)? {
            MessageValue::Array(items) => Some(items),
            MessageValue::Single(_) => None,
        }
    }

    /// Returns `true` when `key` resolves to any value along the chain.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.retrieve(key).is_some()
    }

    /// Every key that [`Bundle::get`] resolves, computed once per bundle.
    ///
    /// Array-valued keys are excluded, including inherited string keys that
    /// an array in a more specific bundle shadows.
    #[must_use]
    pub fn keys(&self) -> Arc<BTreeSet<String>> {
        if self.is_empty() {
            return Arc::default();
        }
        Arc::clone(self.inner.keys.get_or_init(|| Arc::new(self.collect_keys())))
    }

    fn collect_keys(&self) -> BTreeSet<String> {
        let mut keys: BTreeSet<String> = self
            .inner
            .parent
            .as_ref()
            .map(|parent| (*parent.keys()).clone())
            .unwrap_or_default();
        for entry in &self.inner.messages {
            match entry.value() {
                MessageValue::Single(_) => {
                    keys.insert(entry.key().clone());
                }
                MessageValue::Array(_) => {
                    keys.remove(entry.key());
                }
            }
        }
        keys
    }

    fn retrieve(&self, key: &str) -> Option<MessageValue> {
        if self.is_empty() {
            return None;
        }
        if let Some(local) = self.inner.messages.get(key) {
            return Some(local.value().clone());
        }
        let found = self.inner.parent.as_ref()?.retrieve(key)?;
        self.inner
            .messages
            .entry(key.to_owned())
            .or_insert_with(|| found.clone());
        Some(found)
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Bundle::EMPTY");
        }
        f.debug_struct("Bundle")
            .field("locale", &self.inner.locale)
            .field("entries", &self.inner.messages.len())
            .field(
                "parent",
                &self.inner.parent.as_ref().map(|parent| parent.locale()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests;
