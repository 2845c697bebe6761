//! # Cache Trait Hierarchy
//!
//! Shared contract for the two eviction policies in this crate. Both caches
//! are capacity-bounded maps with `put`/`get`/`remove`/`contains`/`len`; they
//! differ only in how they pick an eviction victim.
//!
//! ## Architecture
//!
//! ```text
//!                          ┌─────────────────────────────────────────┐
//!                          │            CoreCache<K, V>              │
//!                          │                                         │
//!                          │  put(&mut, K, V) → Option<V>            │
//!                          │  get(&mut, &K) → Option<&V>             │
//!                          │  contains(&, &K) → bool                 │
//!                          │  len(&) → usize                         │
//!                          │  is_empty(&) → bool                     │
//!                          │  capacity(&) → usize                    │
//!                          │  clear(&mut)                            │
//!                          └──────────────────┬──────────────────────┘
//!                                             │
//!                                             ▼
//!                          ┌─────────────────────────────────────────┐
//!                          │          MutableCache<K, V>             │
//!                          │                                         │
//!                          │  take(&K) → Option<V>                   │
//!                          │  remove(&K) → bool                      │
//!                          └──────────────────┬──────────────────────┘
//!                                             │
//!                ┌────────────────────────────┴────────────────────────────┐
//!                ▼                                                         ▼
//!   ┌────────────────────────────┐                          ┌────────────────────────────┐
//!   │   LruCacheTrait<K, V>      │                          │   LrukCacheTrait<K, V>     │
//!   │                            │                          │                            │
//!   │  pop_lru() → (K, V)        │                          │  pop_lru_k() → (K, V)      │
//!   │  peek_lru() → (&K, &V)     │                          │  peek_lru_k() → (&K, &V)   │
//!   │  touch(&K) → bool          │                          │  k_value() → usize         │
//!   │  recency_rank(&K) → usize  │                          │  access_history(&K)        │
//!   └────────────────────────────┘                          │  access_count(&K)          │
//!                                                           │  kth_access(&K) → u64      │
//!                                                           │  k_distance(&K) → u64      │
//!                                                           │  touch(&K) → bool          │
//!                                                           │  k_distance_rank(&K)       │
//!                                                           │  is_evictable(&K) → bool   │
//!                                                           └────────────────────────────┘
//! ```
//!
//! ## Peek versus touch
//!
//! `contains` and the `peek_*` methods never record an access. `get`, `put`
//! and `touch` always do. For LRU-K this matters: recording an access moves
//! the entry's backward K-distance anchor and may make it evictable.
//!
//! ## Thread Safety
//!
//! Cache types are single-threaded. Wrap them in a lock, or enable the
//! `concurrency` feature for ready-made wrappers implementing
//! [`ConcurrentCache`].

/// Core cache operations that both policies support.
///
/// # Example
///
/// ```
/// use lrukit::traits::CoreCache;
/// use lrukit::policy::lru_k::LrukCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let mut cache = LrukCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or overwrites `key`, returning the previous value if it existed.
    ///
    /// Inserting a new key into a full cache first evicts one entry according
    /// to the policy. Records an access.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`, recording an access on a hit.
    ///
    /// A miss has no side effect.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is present. Never records an access.
    fn contains(&self, key: &K) -> bool;

    /// Number of entries currently stored.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity fixed at construction.
    fn capacity(&self) -> usize;

    /// Removes every entry.
    fn clear(&mut self);
}

/// Arbitrary key removal.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, MutableCache};
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(4);
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// assert_eq!(cache.take(&"a"), Some(1));
/// assert!(cache.remove(&"b"));
/// assert!(!cache.remove(&"b"));
/// assert!(cache.is_empty());
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key` and returns its value.
    fn take(&mut self, key: &K) -> Option<V>;

    /// Removes `key`. Returns `true` if it was present; absent keys are a no-op.
    fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }
}

/// Recency-ordered (single-history) cache operations.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, LruCacheTrait};
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// cache.put(1, "one");
/// cache.put(2, "two");
/// cache.touch(&1);
///
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
/// assert_eq!(cache.recency_rank(&1), Some(0));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without touching it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` from the most recent end (0 = most recently used).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// LRU-K specific operations.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, LrukCacheTrait};
/// use lrukit::policy::lru_k::LrukCache;
///
/// let mut cache = LrukCache::with_k(10, 2);
/// cache.put(1, "value");
///
/// // One access: not yet an eviction candidate
/// assert_eq!(cache.access_count(&1), Some(1));
/// assert_eq!(cache.kth_access(&1), None);
/// assert_eq!(cache.is_evictable(&1), Some(false));
///
/// // Second access completes the history
/// cache.get(&1);
/// assert_eq!(cache.access_history(&1), Some(vec![2, 1]));
/// assert_eq!(cache.kth_access(&1), Some(1));
/// assert_eq!(cache.is_evictable(&1), Some(true));
/// ```
pub trait LrukCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the evictable entry with the oldest K-th most
    /// recent access. Returns `None` if no entry has K recorded accesses.
    fn pop_lru_k(&mut self) -> Option<(K, V)>;

    /// Returns the entry [`pop_lru_k`](Self::pop_lru_k) would remove.
    fn peek_lru_k(&self) -> Option<(&K, &V)>;

    /// The K this cache was built with.
    fn k_value(&self) -> usize;

    /// Recorded access timestamps for `key`, most recent first (at most K).
    fn access_history(&self, key: &K) -> Option<Vec<u64>>;

    /// Number of retained access timestamps for `key` (capped at K).
    fn access_count(&self, key: &K) -> Option<usize>;

    /// Timestamp of the K-th most recent access. `None` until `key` has K
    /// recorded accesses.
    fn kth_access(&self, key: &K) -> Option<u64>;

    /// Backward K-distance: logical ticks elapsed since the K-th most recent
    /// access. `None` until `key` has K recorded accesses.
    fn k_distance(&self, key: &K) -> Option<u64>;

    /// Records an access without reading the value. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in the eviction ordering (0 = next victim).
    /// `None` if absent or not yet evictable.
    fn k_distance_rank(&self, key: &K) -> Option<usize>;

    /// Whether `key` has reached full history. `None` if absent.
    fn is_evictable(&self, key: &K) -> Option<bool>;
}

/// Marker trait for caches that are safe to share across threads.
pub trait ConcurrentCache: Send + Sync {}
