//! # Least Recently Used (LRU) Cache Implementation
//!
//! The single-history instance of the cache contract: every entry is an
//! eviction candidate from its first access, and the candidate order is plain
//! recency. An access moves the entry to the front of a list; eviction takes
//! the back.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                                  │
//!   │                                                                          │
//!   │   ┌──────────────────────────────────────────────────────────────────┐   │
//!   │   │  index: FxHashMap<K, SlotId>                                     │   │
//!   │   │                                                                  │   │
//!   │   │  ┌─────────┬──────────────────────────────────────────────┐      │   │
//!   │   │  │   Key   │  SlotId                                      │      │   │
//!   │   │  ├─────────┼──────────────────────────────────────────────┤      │   │
//!   │   │  │  page_1 │  ──────────────────────────────────────┐     │      │   │
//!   │   │  │  page_2 │  ────────────────────────────────┐     │     │      │   │
//!   │   │  │  page_3 │  ──────────────────────────┐     │     │     │      │   │
//!   │   │  └─────────┴────────────────────────────┼─────┼─────┼─────┘      │   │
//!   │   └─────────────────────────────────────────┼─────┼─────┼────────────┘   │
//!   │                                             │     │     │                │
//!   │   ┌─────────────────────────────────────────┼─────┼─────┼────────────┐   │
//!   │   │  list: IntrusiveList<Entry<K, V>>       ▼     ▼     ▼            │   │
//!   │   │                                                                  │   │
//!   │   │  head ──► ┌──────┐ ◄──► ┌──────┐ ◄──► ┌──────┐ ◄── tail          │   │
//!   │   │    (MRU)  │ k, v │      │ k, v │      │ k, v │   (LRU)           │   │
//!   │   │           └──────┘      └──────┘      └──────┘                   │   │
//!   │   └──────────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nodes live in a slot arena and link to each other by `SlotId`, so the
//! index holds plain ids rather than pointers.
//!
//! ## Operations
//!
//! | Method              | Complexity | Description                              |
//! |---------------------|------------|------------------------------------------|
//! | `put(key, val)`     | O(1)       | Insert/update at MRU, may evict LRU      |
//! | `get(&key)`         | O(1)       | Get value, move to MRU                   |
//! | `peek(&key)`        | O(1)       | Get value, order unchanged               |
//! | `contains(&key)`    | O(1)       | Existence check, order unchanged         |
//! | `remove(&key)`      | O(1)       | Remove entry                             |
//! | `pop_lru()`         | O(1)       | Remove least recently used               |
//! | `recency_rank(&k)`  | O(N)       | Distance from the MRU end                |
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//! use lrukit::traits::{CoreCache, LruCacheTrait};
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);
//!
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.peek_lru(), Some((&"a", &1)));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Recency-ordered cache with O(1) access and eviction.
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    list: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(16).is_ok());
    /// assert!(LruCache::<u32, u32>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Returns the value for `key` without changing recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    fn evict_lru(&mut self) -> Option<Entry<K, V>> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        trace!(remaining = self.index.len(), "evicted least recently used entry");
        Some(entry)
    }

    /// Checks that the index and the recency list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys, list holds {} nodes",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (id, entry) in self.list.iter_entries() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new("list node not indexed under its key"));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("{}", e);
        }
        self.list.debug_validate_invariants();
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_put_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();
            self.list.move_to_front(id);
            return self
                .list
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();

        if self.index.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();
            if self.evict_lru().is_some() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            }
        }

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
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
        self.list.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn take(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();
        let id = self.index.remove(key)?;
        let entry = self.list.remove(id)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();
        Some(entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();
        let entry = self.evict_lru()?;
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();
        Some((entry.key, entry.value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();
        let entry = self.list.back()?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();
        Some((&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        self.list.move_to_front(id);
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();
        true
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        let &target = self.index.get(key)?;
        for (rank, (id, _)) in self.list.iter_entries().enumerate() {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();
            if id == target {
                #[cfg(feature = "metrics")]
                (&self.metrics).record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.index.len())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Copies the counters together with the current length and capacity.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            put_calls: self.metrics.put_calls,
            put_updates: self.metrics.put_updates,
            put_new: self.metrics.put_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            clear_calls: self.metrics.clear_calls,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.index.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    mod basic_behavior {
        use super::super::*;

        #[test]
        fn get_promotes_and_put_evicts_back() {
            let mut cache = LruCache::new(2);
            cache.put("a", 1);
            cache.put("b", 2);
            assert_eq!(cache.get(&"a"), Some(&1));
            cache.put("c", 3);

            assert!(cache.contains(&"a"));
            assert!(!cache.contains(&"b"));
            assert!(cache.contains(&"c"));
            cache.debug_validate_invariants();
        }

        #[test]
        fn put_existing_updates_value_and_recency() {
            let mut cache = LruCache::new(2);
            cache.put(1, "one");
            cache.put(2, "two");
            assert_eq!(cache.put(1, "uno"), Some("one"));
            cache.put(3, "three");

            assert_eq!(cache.peek(&1), Some(&"uno"));
            assert!(!cache.contains(&2));
            assert_eq!(cache.len(), 2);
        }

        #[test]
        fn peek_and_contains_keep_order() {
            let mut cache = LruCache::new(2);
            cache.put(1, ());
            cache.put(2, ());
            assert!(cache.contains(&1));
            assert_eq!(cache.peek(&1), Some(&()));
            cache.put(3, ());
            assert!(!cache.contains(&1));
        }

        #[test]
        fn remove_and_take() {
            let mut cache = LruCache::new(3);
            cache.put(1, 10);
            cache.put(2, 20);
            assert_eq!(cache.take(&1), Some(10));
            assert!(cache.remove(&2));
            assert!(!cache.remove(&2));
            assert!(cache.is_empty());
            cache.debug_validate_invariants();
        }

        #[test]
        fn extend_inserts_in_order() {
            let mut cache = LruCache::new(2);
            cache.extend([(1, 'a'), (2, 'b'), (3, 'c')]);
            let keys: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
            assert_eq!(keys, vec![3, 2]);
        }
    }

    mod lru_operations {
        use super::super::*;

        #[test]
        fn pop_lru_drains_oldest_first() {
            let mut cache = LruCache::new(3);
            cache.put(1, 'a');
            cache.put(2, 'b');
            cache.put(3, 'c');
            cache.touch(&1);

            assert_eq!(cache.pop_lru(), Some((2, 'b')));
            assert_eq!(cache.pop_lru(), Some((3, 'c')));
            assert_eq!(cache.pop_lru(), Some((1, 'a')));
            assert_eq!(cache.pop_lru(), None);
        }

        #[test]
        fn recency_rank_counts_from_front() {
            let mut cache = LruCache::new(4);
            cache.put(1, ());
            cache.put(2, ());
            cache.put(3, ());
            assert_eq!(cache.recency_rank(&3), Some(0));
            assert_eq!(cache.recency_rank(&1), Some(2));
            cache.touch(&1);
            assert_eq!(cache.recency_rank(&1), Some(0));
            assert_eq!(cache.recency_rank(&9), None);
        }

        #[test]
        fn touch_absent_returns_false() {
            let mut cache: LruCache<u8, u8> = LruCache::new(1);
            assert!(!cache.touch(&1));
        }
    }

    mod edge_cases {
        use super::super::*;

        #[test]
        fn zero_capacity_rejected() {
            assert!(LruCache::<u8, u8>::try_new(0).is_err());
        }

        #[test]
        #[should_panic(expected = "capacity")]
        fn new_panics_on_zero_capacity() {
            let _ = LruCache::<u8, u8>::new(0);
        }

        #[test]
        fn capacity_one_keeps_latest() {
            let mut cache = LruCache::new(1);
            cache.put(1, 1);
            cache.put(2, 2);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.peek_lru(), Some((&2, &2)));
        }

        #[test]
        fn clear_then_reuse() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.clear();
            assert!(cache.is_empty());
            cache.put(2, 2);
            assert_eq!(cache.get(&2), Some(&2));
            cache.debug_validate_invariants();
        }

        #[test]
        fn len_never_exceeds_capacity() {
            let mut cache = LruCache::new(4);
            for i in 0..100u32 {
                cache.put(i % 11, i);
                if i % 3 == 0 {
                    cache.get(&(i % 5));
                }
                assert!(cache.len() <= 4);
                assert!(cache.check_invariants().is_ok());
            }
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::super::*;

        static_assertions::assert_impl_all!(LruCache<u32, u32>: Send);
        static_assertions::assert_not_impl_any!(LruCache<u32, u32>: Sync);

        #[test]
        fn counters_track_operations() {
            let mut cache = LruCache::new(1);
            cache.put(1, ());
            cache.put(2, ());
            cache.get(&2);
            cache.get(&1);
            let _ = cache.recency_rank(&2);

            let snapshot = cache.metrics_snapshot();
            assert_eq!(snapshot.put_calls, 2);
            assert_eq!(snapshot.evicted_entries, 1);
            assert_eq!(snapshot.get_hits, 1);
            assert_eq!(snapshot.get_misses, 1);
            assert_eq!(snapshot.recency_rank_found, 1);
            assert_eq!(snapshot.recency_rank_scan_steps, 1);
        }
    }
}
