use dashmap::DashMap;
use std::time::Instant;

/// Default number of distinct keys kept before eviction starts.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// A cached value together with its last access time.
struct CacheEntry<V> {
    value: V,
    last_used: Instant,
}

/// Concurrent bounded cache with least-recently-used eviction.
///
/// Keys are package names; values are whatever the caller memoizes, looked
/// up results included (a miss against the registry is itself a cacheable
/// answer). Entries live for the process lifetime unless evicted: once the
/// cache holds `capacity` distinct keys, inserting a new key drops the
/// entry that has gone unused the longest.
///
/// Reads and writes may race on a never-yet-cached key; the accepted
/// consequence is a redundant lookup upstream, never corruption, since a
/// later write of identical content is idempotent. Under concurrent
/// inserts the capacity bound is enforced approximately.
///
/// # Examples
///
/// ```
/// use reqcheck_core::BoundedCache;
///
/// let cache: BoundedCache<u32> = BoundedCache::with_capacity(2);
/// cache.insert("flask", 1);
/// cache.insert("requests", 2);
///
/// // Touch "flask" so "requests" becomes the oldest-unused entry
/// assert_eq!(cache.get("flask"), Some(1));
///
/// cache.insert("numpy", 3);
/// assert_eq!(cache.get("requests"), None);
/// assert_eq!(cache.get("flask"), Some(1));
/// ```
pub struct BoundedCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    capacity: usize,
}

impl<V: Clone> BoundedCache<V> {
    /// Creates a cache with the default capacity of 100 keys.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache bounded to `capacity` distinct keys.
    ///
    /// A capacity of zero is treated as one; the cache always retains the
    /// most recent insertion.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Returns a clone of the cached value for `key`, refreshing its
    /// last-used time.
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get_mut(key).map(|mut entry| {
            entry.last_used = Instant::now();
            entry.value.clone()
        })
    }

    /// Inserts or replaces the value for `key`.
    ///
    /// When the cache is at capacity and `key` is new, the least-recently
    /// used entry is evicted first.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.entries.insert(
            key,
            CacheEntry {
                value,
                last_used: Instant::now(),
            },
        );
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Drops the entry whose last access is furthest in the past.
    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().last_used)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            tracing::debug!("evicted cache entry for {}", key);
        }
    }
}

impl<V: Clone> Default for BoundedCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
