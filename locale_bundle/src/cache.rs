//! Bounded in-memory cache with idle expiry.
//!
//! Entries are evicted when they have not been read for longer than the
//! configured time-to-live, or when the cache is full and they are the least
//! recently used. Values are cloned out on every hit, so evicting an entry never
//! affects a value a caller already holds.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

struct Entry<V> {
    value: V,
    last_access: Instant,
}

/// Thread-safe LRU cache whose entries also expire after a period of disuse.
///
/// The lock is held only for the duration of a single map operation.
pub struct BoundedCache<K: Hash + Eq, V> {
    entries: Mutex<LruCache<K, Entry<V>>>,
    ttl: Duration,
}

impl<K: Hash + Eq, V: Clone> BoundedCache<K, V> {
    /// Creates a cache holding at most `capacity` entries (minimum one), each
    /// expiring once idle for longer than `ttl`.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let bound = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(bound)),
            ttl,
        }
    }

    /// Returns a clone of the cached value and refreshes its access time.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at<Q>(&self, key: &Q, now: Instant) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut entries = self.entries.lock();
        let entry = entries.get_mut(key)?;
        if now.saturating_duration_since(entry.last_access) > self.ttl {
            entries.pop(key);
            return None;
        }
        entry.last_access = now;
        Some(entry.value.clone())
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub(crate) fn insert_at(&self, key: K, value: V, now: Instant) {
        self.entries.lock().put(
            key,
            Entry {
                value,
                last_access: now,
            },
        );
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.lock().pop(key).map(|entry| entry.value)
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of entries currently held, including ones that have expired but
    /// not yet been observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` when no entries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Idle period after which entries expire.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<K: Hash + Eq, V> fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.lock();
        f.debug_struct("BoundedCache")
            .field("len", &entries.len())
            .field("capacity", &entries.cap())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn returns_inserted_values() {
        let cache = BoundedCache::new(4, Duration::from_secs(60));
        cache.insert("greeting".to_owned(), 1_u32);
        assert_eq!(cache.get("greeting"), Some(1));
        assert_eq!(cache.get("missing"), None);
    }

    #[rstest]
    fn evicts_least_recently_used_at_capacity() {
        let cache = BoundedCache::new(2, Duration::from_secs(60));
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.get("a"), Some(1));
        cache.insert("c", 3);
        assert_eq!(cache.get("b"), None, "b was least recently used");
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[rstest]
    fn expires_entries_idle_past_ttl() {
        let ttl = Duration::from_secs(10);
        let cache = BoundedCache::new(4, ttl);
        let start = Instant::now();
        cache.insert_at("a", 1, start);
        assert_eq!(cache.get_at("a", start + Duration::from_secs(5)), Some(1));
        // The read above refreshed the access time.
        assert_eq!(cache.get_at("a", start + Duration::from_secs(14)), Some(1));
        assert_eq!(cache.get_at("a", start + Duration::from_secs(30)), None);
        assert!(cache.is_empty(), "expired entry should be dropped on read");
    }

    #[rstest]
    fn zero_capacity_still_holds_one_entry() {
        let cache = BoundedCache::new(0, Duration::from_secs(1));
        cache.insert("a", 1);
        assert_eq!(cache.len(), 1);
    }

    #[rstest]
    fn remove_and_clear_drop_entries() {
        let cache = BoundedCache::new(4, Duration::from_secs(60));
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.remove("a"), Some(1));
        cache.clear();
        assert!(cache.is_empty());
    }
}
