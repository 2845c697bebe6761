//! # LRU-K Cache Implementation
//!
//! Capacity-bounded map that evicts the entry whose K-th most recent access
//! lies furthest in the past (its *backward K-distance*). Entries seen fewer
//! than K times have not established an access pattern and are never chosen
//! as victims; one-off scans therefore cannot flush entries that are
//! accessed repeatedly.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LrukCache<K, V>                                 │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  index: FxHashMap<K, Entry<V>>                                     │ │
//!   │   │                                                                    │ │
//!   │   │  ┌─────────┬────────────────────────────────┬──────────────────┐   │ │
//!   │   │  │   Key   │  AccessHistory (≤ K ticks)     │  evictable       │   │ │
//!   │   │  ├─────────┼────────────────────────────────┼──────────────────┤   │ │
//!   │   │  │ page_1  │  [t₅, t₉]                      │  true            │   │ │
//!   │   │  │ page_2  │  [t₃]                          │  false           │   │ │
//!   │   │  │ page_3  │  [t₂, t₇]                      │  true            │   │ │
//!   │   │  └─────────┴────────────────────────────────┴──────────────────┘   │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  order: EvictionOrder<K>   (BTreeSet<(anchor, K)>)                 │ │
//!   │   │                                                                    │ │
//!   │   │   first ──► (t₂, page_3) ──► (t₅, page_1)                          │ │
//!   │   │   only entries with a full history are members                    │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   clock: LogicalClock  (one tick per recorded access, never reset)       │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Entry Lifecycle
//!
//! ```text
//!   put(new key)          access #2 .. #K-1        access #K
//!   ───────────► Tracked ─────────────────► Tracked ──────────► Full
//!                (index only)                                    (index + order)
//!
//!   Full ── access ──► remove (t_old, key) from order
//!                      record tick, oldest tick drops out
//!                      insert (t_new, key) into order
//! ```
//!
//! An entry's anchor is the oldest tick in its full history. The order is
//! keyed by `(anchor, key)`, so two entries with the same anchor are ranked
//! by key and the first element is always a single well-defined victim.
//!
//! ## Overflow Without a Victim
//!
//! A `put` of a new key into a full cache evicts the first element of the
//! order. When no entry has a full history the order is empty, nothing is
//! evicted, and the new entry is still admitted: `len()` can exceed
//! `capacity()` until entries accumulate K accesses.
//!
//! ## Core Operations
//!
//! | Method              | Complexity | Description                              |
//! |---------------------|------------|------------------------------------------|
//! | `new(capacity)`     | O(1)       | Create cache with K=2                    |
//! | `try_with_k(cap,k)` | O(1)       | Create cache, rejecting zero cap or K    |
//! | `put(key, val)`     | O(log N)   | Insert/update, may evict one entry       |
//! | `get(&key)`         | O(log N)   | Get value, records an access             |
//! | `contains(&key)`    | O(1)       | Existence check, no access recorded      |
//! | `remove(&key)`      | O(log N)   | Remove entry by key                      |
//! | `len()`             | O(1)       | Current number of entries                |
//! | `clear()`           | O(N)       | Remove all entries, clock keeps running  |
//!
//! ## LRU-K Specific Operations (LrukCacheTrait)
//!
//! | Method               | Complexity | Description                             |
//! |----------------------|------------|-----------------------------------------|
//! | `pop_lru_k()`        | O(log N)   | Remove and return victim entry          |
//! | `peek_lru_k()`       | O(log N)   | Victim without removing                 |
//! | `access_history()`   | O(K)       | Ticks, most recent first                |
//! | `kth_access()`       | O(1)       | Anchor tick (None below K accesses)     |
//! | `k_distance()`       | O(1)       | Ticks elapsed since the anchor          |
//! | `touch(&key)`        | O(log N)   | Record access without reading           |
//! | `k_distance_rank()`  | O(N)       | Position in the eviction order          |
//!
//! ## Clock Exhaustion
//!
//! Every recorded access consumes one tick of a `u64` logical clock. Once
//! the clock reads `u64::MAX` no further access can be recorded: the
//! `try_*` methods return [`CacheError::ClockExhausted`] and leave the cache
//! untouched, while the trait methods panic.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru_k::LrukCache;
//! use lrukit::traits::{CoreCache, LrukCacheTrait, MutableCache};
//!
//! let mut cache = LrukCache::with_k(2, 2);
//!
//! cache.put("a", 1);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("b", 2);
//!
//! // "a" reached full history first, so its anchor is oldest
//! assert_eq!(cache.peek_lru_k(), Some((&"a", &1)));
//!
//! cache.put("c", 3);
//! assert!(!cache.contains(&"a"));
//! assert_eq!(cache.len(), 2);
//!
//! // "c" has one access: present but not yet a candidate
//! assert_eq!(cache.is_evictable(&"c"), Some(false));
//! assert!(cache.remove(&"c"));
//! ```
//!
//! ## Thread Safety
//!
//! `LrukCache` is single-threaded. It is `Send`; with `metrics` enabled it is
//! not `Sync`, because read paths bump plain counter cells. With the
//! `concurrency` feature, `ConcurrentLrukCache` guards one cache behind a
//! mutex and `ShardedLrukCache` partitions capacity across independently
//! locked shards.
//!
//! ## Reference
//!
//! O'Neil, E. J., O'Neil, P. E., & Weikum, G. (1993).
//! "The LRU-K page replacement algorithm for database disk buffering."
//! ACM SIGMOD Record, 22(2), 297-306.

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, error, trace};

#[cfg(feature = "concurrency")]
use crate::ds::ShardSelector;
use crate::ds::{AccessHistory, EvictionOrder, LogicalClock};
use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruKMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruKMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruKMetricsReadRecorder, LruKMetricsRecorder, MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LrukCacheTrait, MutableCache};

/// K used by [`LrukCache::new`].
pub const DEFAULT_K: usize = 2;

struct Entry<V> {
    value: V,
    history: AccessHistory,
    evictable: bool,
}

impl<V> Entry<V> {
    fn new(value: V, k: usize) -> Self {
        Self {
            value,
            history: AccessHistory::new(k),
            evictable: false,
        }
    }

    /// Anchor under which this entry sits in the eviction order.
    fn anchor(&self) -> Option<u64> {
        if self.evictable {
            self.history.oldest()
        } else {
            None
        }
    }
}

/// LRU-K cache keyed by backward K-distance.
///
/// Keys must be totally ordered: ties between equal anchors are broken by
/// the key's `Ord`.
pub struct LrukCache<K, V> {
    index: FxHashMap<K, Entry<V>>,
    order: EvictionOrder<K>,
    clock: LogicalClock,
    capacity: usize,
    k: usize,
    #[cfg(feature = "metrics")]
    metrics: LruKMetrics,
}

impl<K, V> LrukCache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    /// Creates an LRU-2 cache.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_k(capacity, DEFAULT_K)
    }

    /// Creates a cache tracking the last `k` accesses per entry.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `k` is zero. Use [`try_with_k`](Self::try_with_k)
    /// to handle invalid configuration.
    pub fn with_k(capacity: usize, k: usize) -> Self {
        match Self::try_with_k(capacity, k) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache tracking the last `k` accesses per entry.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru_k::LrukCache;
    ///
    /// assert!(LrukCache::<u32, u32>::try_with_k(8, 3).is_ok());
    /// assert!(LrukCache::<u32, u32>::try_with_k(8, 0).is_err());
    /// assert!(LrukCache::<u32, u32>::try_with_k(0, 2).is_err());
    /// ```
    pub fn try_with_k(capacity: usize, k: usize) -> Result<Self, ConfigError> {
        Self::try_with_clock(capacity, k, LogicalClock::new())
    }

    /// Creates a cache that draws timestamps from `clock`.
    ///
    /// The cache takes ownership of the clock; it is never reset.
    pub fn try_with_clock(
        capacity: usize,
        k: usize,
        clock: LogicalClock,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        if k == 0 {
            return Err(ConfigError::new("k must be greater than zero"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: EvictionOrder::new(),
            clock,
            capacity,
            k,
            #[cfg(feature = "metrics")]
            metrics: LruKMetrics::default(),
        })
    }

    /// Last issued timestamp (0 before the first access).
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Number of entries that have reached full history.
    pub fn evictable_len(&self) -> usize {
        self.order.len()
    }

    /// Returns the value for `key` without recording an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|entry| &entry.value)
    }

    /// Fallible form of [`CoreCache::get`].
    pub fn try_get(&mut self, key: &K) -> Result<Option<&V>, CacheError> {
        if !self.index.contains_key(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return Ok(None);
        }
        self.record_access(key)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        Ok(self.index.get(key).map(|entry| &entry.value))
    }

    /// Fallible form of [`CoreCache::put`].
    ///
    /// On error the cache is exactly as it was before the call.
    pub fn try_put(&mut self, key: K, value: V) -> Result<Option<V>, CacheError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_put_call();

        if self.index.contains_key(&key) {
            self.record_access(&key)?;
            let entry = self
                .index
                .get_mut(&key)
                .ok_or_else(|| InvariantError::new("entry vanished while recording access"))?;
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();
            return Ok(Some(std::mem::replace(&mut entry.value, value)));
        }

        // Validate the tick before evicting so a failed put changes nothing.
        self.clock.check().inspect_err(|e| error!(%e, "put rejected"))?;

        if self.index.len() >= self.capacity {
            self.evict_for_admission();
        }

        self.index.insert(key.clone(), Entry::new(value, self.k));
        self.record_access(&key)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();
        Ok(None)
    }

    /// Fallible form of [`LrukCacheTrait::touch`].
    pub fn try_touch(&mut self, key: &K) -> Result<bool, CacheError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();
        if !self.index.contains_key(key) {
            return Ok(false);
        }
        self.record_access(key)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();
        Ok(true)
    }

    /// Records one access to a present key.
    ///
    /// Ticks the clock, appends to the entry's history and keeps the order in
    /// step: an entry reaching K accesses joins the order, an entry already in
    /// it is taken out under its old anchor and reinserted under the new one.
    fn record_access(&mut self, key: &K) -> Result<(), CacheError> {
        let entry = self
            .index
            .get_mut(key)
            .ok_or_else(|| InvariantError::new("access recorded for a key missing from index"))?;

        let now = self
            .clock
            .tick()
            .inspect_err(|e| error!(%e, "access not recorded"))?;

        let old_anchor = entry.anchor();
        let became_full = entry.history.record(now);
        let new_anchor = entry
            .history
            .oldest()
            .ok_or_else(|| InvariantError::new("history empty after recording an access"))?;

        if became_full {
            entry.evictable = true;
            self.order.insert(key.clone(), new_anchor);
            trace!(anchor = new_anchor, "entry reached full history");
            #[cfg(feature = "metrics")]
            self.metrics.record_promotion();
        } else if let Some(old_anchor) = old_anchor {
            if !self.order.reposition(key, old_anchor, new_anchor) {
                return Err(InvariantError::new(format!(
                    "evictable entry missing from order at anchor {}",
                    old_anchor
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Evicts one entry ahead of admitting a new key into a full cache.
    fn evict_for_admission(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();
        match self.remove_first_evictable() {
            Some(_) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            },
            None => {
                debug!(
                    len = self.index.len(),
                    capacity = self.capacity,
                    "no entry has full history; admitting over capacity"
                );
                #[cfg(feature = "metrics")]
                self.metrics.record_evict_skipped();
            },
        }
    }

    fn remove_first_evictable(&mut self) -> Option<(K, V)> {
        let (anchor, key) = self.order.pop_first()?;
        let entry = self.index.remove(&key)?;
        trace!(anchor, remaining = self.index.len(), "evicted entry");
        Some((key, entry.value))
    }

    /// Checks that the index, the order and every history agree.
    ///
    /// Returns the first inconsistency found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut evictable = 0usize;
        for (key, entry) in &self.index {
            if entry.history.is_empty() {
                return Err(InvariantError::new("indexed entry has no recorded access"));
            }
            if entry.history.len() > self.k {
                return Err(InvariantError::new(format!(
                    "history holds {} ticks, k is {}",
                    entry.history.len(),
                    self.k
                )));
            }
            if entry.history.most_recent() > Some(self.clock.now()) {
                return Err(InvariantError::new("history tick is ahead of the clock"));
            }
            if entry.evictable != entry.history.is_full() {
                return Err(InvariantError::new(
                    "evictable flag disagrees with history fullness",
                ));
            }
            if let Some(anchor) = entry.anchor() {
                evictable += 1;
                if !self.order.contains(key, anchor) {
                    return Err(InvariantError::new(format!(
                        "evictable entry not ordered at anchor {}",
                        anchor
                    )));
                }
            }
        }
        if evictable != self.order.len() {
            return Err(InvariantError::new(format!(
                "order holds {} positions for {} evictable entries",
                self.order.len(),
                evictable
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("{}", e);
        }
        self.order.debug_validate_invariants();
        for entry in self.index.values() {
            entry.history.debug_validate_invariants();
        }
    }
}

impl<K, V> CoreCache<K, V> for LrukCache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    /// # Panics
    ///
    /// Panics if the logical clock is exhausted. Use
    /// [`try_put`](LrukCache::try_put) to observe the error instead.
    fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.try_put(key, value) {
            Ok(previous) => previous,
            Err(e) => panic!("{}", e),
        }
    }

    /// # Panics
    ///
    /// Panics on a hit if the logical clock is exhausted.
    fn get(&mut self, key: &K) -> Option<&V> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.index.clear();
        self.order.clear();
    }
}

impl<K, V> MutableCache<K, V> for LrukCache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    fn take(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        if let Some(anchor) = self.index.get(key)?.anchor() {
            self.order.remove(key, anchor);
        }
        let entry = self.index.remove(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();
        Some(entry.value)
    }
}

impl<K, V> LrukCacheTrait<K, V> for LrukCache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    fn pop_lru_k(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_k_call();
        let popped = self.remove_first_evictable()?;
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_k_found();
        Some(popped)
    }

    fn peek_lru_k(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_k_call();
        let (_, key) = self.order.first()?;
        let (key, entry) = self.index.get_key_value(key)?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_k_found();
        Some((key, &entry.value))
    }

    fn k_value(&self) -> usize {
        self.k
    }

    fn access_history(&self, key: &K) -> Option<Vec<u64>> {
        self.index.get(key).map(|entry| entry.history.to_vec_mru())
    }

    fn access_count(&self, key: &K) -> Option<usize> {
        self.index.get(key).map(|entry| entry.history.len())
    }

    fn kth_access(&self, key: &K) -> Option<u64> {
        self.index.get(key)?.anchor()
    }

    fn k_distance(&self, key: &K) -> Option<u64> {
        self.kth_access(key)
            .map(|anchor| self.clock.now().saturating_sub(anchor))
    }

    /// # Panics
    ///
    /// Panics if `key` is present and the logical clock is exhausted.
    fn touch(&mut self, key: &K) -> bool {
        match self.try_touch(key) {
            Ok(found) => found,
            Err(e) => panic!("{}", e),
        }
    }

    fn k_distance_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_k_distance_rank_call();
        let anchor = self.index.get(key)?.anchor()?;
        let rank = self.order.rank_of(key, anchor)?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_k_distance_rank_found();
        Some(rank)
    }

    fn is_evictable(&self, key: &K) -> Option<bool> {
        self.index.get(key).map(|entry| entry.evictable)
    }
}

impl<K, V> fmt::Debug for LrukCache<K, V>
where
    K: Ord + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LrukCache")
            .field("k", &self.k)
            .field("capacity", &self.capacity)
            .field("len", &self.index.len())
            .field("evictable_len", &self.order.len())
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}

/// Metrics functionality (requires `metrics` feature).
#[cfg(feature = "metrics")]
impl<K, V> LrukCache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    /// Returns a snapshot of cache metrics.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru_k::LrukCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache: LrukCache<u32, &str> = LrukCache::new(100);
    /// cache.put(1, "one");
    /// cache.get(&1);
    /// cache.get(&2); // miss
    ///
    /// let snapshot = cache.metrics_snapshot();
    /// assert_eq!(snapshot.get_hits, 1);
    /// assert_eq!(snapshot.get_misses, 1);
    /// assert_eq!(snapshot.put_calls, 1);
    /// assert_eq!(snapshot.promotions, 1);
    /// ```
    pub fn metrics_snapshot(&self) -> LruKMetricsSnapshot {
        LruKMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            put_calls: self.metrics.put_calls,
            put_updates: self.metrics.put_updates,
            put_new: self.metrics.put_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            evict_skipped: self.metrics.evict_skipped,
            promotions: self.metrics.promotions,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            clear_calls: self.metrics.clear_calls,
            pop_lru_k_calls: self.metrics.pop_lru_k_calls,
            pop_lru_k_found: self.metrics.pop_lru_k_found,
            peek_lru_k_calls: self.metrics.peek_lru_k_calls.get(),
            peek_lru_k_found: self.metrics.peek_lru_k_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            k_distance_rank_calls: self.metrics.k_distance_rank_calls.get(),
            k_distance_rank_found: self.metrics.k_distance_rank_found.get(),
            cache_len: self.index.len(),
            evictable_len: self.order.len(),
            capacity: self.capacity,
            now: self.clock.now(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruKMetricsSnapshot> for LrukCache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    fn snapshot(&self) -> LruKMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Thread-safe LRU-K cache: one [`LrukCache`] behind a `parking_lot::Mutex`.
///
/// Cloning yields another handle to the same cache. Reads clone the value
/// out, since a recorded access needs the lock for the whole operation.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru_k::ConcurrentLrukCache;
///
/// let cache: ConcurrentLrukCache<u32, String> = ConcurrentLrukCache::with_k(64, 2);
/// cache.put(1, "one".to_string());
/// assert_eq!(cache.get(&1), Some("one".to_string()));
/// assert!(cache.remove(&1));
/// assert!(cache.is_empty());
/// ```
#[cfg(feature = "concurrency")]
#[derive(Clone)]
pub struct ConcurrentLrukCache<K, V> {
    inner: Arc<Mutex<LrukCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLrukCache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    /// Creates a shared cache.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `k` is zero.
    pub fn with_k(capacity: usize, k: usize) -> Self {
        match Self::try_with_k(capacity, k) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a shared cache, reporting invalid configuration as an error.
    pub fn try_with_k(capacity: usize, k: usize) -> Result<Self, ConfigError> {
        Ok(Self::from_cache(LrukCache::try_with_k(capacity, k)?))
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: LrukCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    pub fn try_put(&self, key: K, value: V) -> Result<Option<V>, CacheError> {
        self.inner.lock().try_put(key, value)
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn try_get(&self, key: &K) -> Result<Option<V>, CacheError>
    where
        V: Clone,
    {
        Ok(self.inner.lock().try_get(key)?.cloned())
    }

    pub fn touch(&self, key: &K) -> bool {
        self.inner.lock().touch(key)
    }

    pub fn remove(&self, key: &K) -> bool {
        self.inner.lock().remove(key)
    }

    pub fn take(&self, key: &K) -> Option<V> {
        self.inner.lock().take(key)
    }

    pub fn pop_lru_k(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru_k()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut LrukCache<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLrukCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentLrukCache")
            .field("len", &cache.index.len())
            .field("capacity", &cache.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentLrukCache<K, V>
where
    K: Send,
    V: Send,
{
}

/// LRU-K cache split into independently locked shards.
///
/// Each key maps to one shard by hash; total capacity is divided across
/// shards, so eviction decisions are per shard rather than global.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru_k::ShardedLrukCache;
///
/// let cache: ShardedLrukCache<u64, u64> = ShardedLrukCache::try_new(64, 2, 4).unwrap();
/// assert_eq!(cache.shard_count(), 4);
/// assert_eq!(cache.capacity(), 64);
///
/// cache.put(7, 70);
/// assert_eq!(cache.get(&7), Some(70));
/// ```
#[cfg(feature = "concurrency")]
pub struct ShardedLrukCache<K, V> {
    shards: Box<[Mutex<LrukCache<K, V>>]>,
    selector: ShardSelector,
    capacity: usize,
}

#[cfg(feature = "concurrency")]
impl<K, V> ShardedLrukCache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    /// Creates `shards` shards sharing `capacity` entries.
    ///
    /// The remainder of `capacity / shards` goes to the lowest shards.
    /// Fails if any argument is zero or `capacity < shards`.
    pub fn try_new(capacity: usize, k: usize, shards: usize) -> Result<Self, ConfigError> {
        if shards == 0 {
            return Err(ConfigError::new("shard count must be greater than zero"));
        }
        if capacity < shards {
            return Err(ConfigError::new(format!(
                "capacity {} cannot be split across {} shards",
                capacity, shards
            )));
        }
        let base = capacity / shards;
        let extra = capacity % shards;
        let shards = (0..shards)
            .map(|i| {
                let shard_capacity = base + usize::from(i < extra);
                LrukCache::try_with_k(shard_capacity, k).map(Mutex::new)
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_boxed_slice();
        let selector = ShardSelector::new(shards.len(), 0);
        Ok(Self {
            shards,
            selector,
            capacity,
        })
    }

    fn shard(&self, key: &K) -> &Mutex<LrukCache<K, V>> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.shard(&key).lock().put(key, value)
    }

    pub fn try_put(&self, key: K, value: V) -> Result<Option<V>, CacheError> {
        self.shard(&key).lock().try_put(key, value)
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().get(key).cloned()
    }

    pub fn touch(&self, key: &K) -> bool {
        self.shard(key).lock().touch(key)
    }

    pub fn remove(&self, key: &K) -> bool {
        self.shard(key).lock().remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.shard(key).lock().contains(key)
    }

    /// Sum of shard lengths. Not atomic across shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.lock().clear();
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.shards
            .iter()
            .try_for_each(|shard| shard.lock().check_invariants())
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ShardedLrukCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedLrukCache")
            .field("shards", &self.shards.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ShardedLrukCache<K, V>
where
    K: Send,
    V: Send,
{
}
