//! Unified cache builder for both eviction policies.
//!
//! Capacity and policy are the whole configuration surface: there are no
//! files or environment variables. Invalid settings surface as
//! [`ConfigError`] from the `try_*` methods.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::LruK { k: 2 });
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! assert!(CacheBuilder::new(0).try_build::<u64, String>(CachePolicy::Lru).is_err());
//! ```

use std::fmt;
use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lru::LruCache;
use crate::policy::lru_k::{DEFAULT_K, LrukCache};
#[cfg(feature = "concurrency")]
use crate::policy::lru_k::ShardedLrukCache;
use crate::traits::{CoreCache, LrukCacheTrait, MutableCache};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// LRU-K with the given history depth.
    LruK { k: usize },
}

impl Default for CachePolicy {
    /// LRU-2.
    fn default() -> Self {
        CachePolicy::LruK { k: DEFAULT_K }
    }
}

/// Policy-independent cache handle.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Lru(LruCache<K, V>),
    LruK(LrukCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::LruK(lruk) => CachePolicy::LruK { k: lruk.k_value() },
        }
    }

    /// Insert or overwrite a key. Returns the previous value if the key existed.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.put(key, value),
            CacheInner::LruK(lruk) => lruk.put(key, value),
        }
    }

    /// Get a reference to a value by key, recording an access.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::LruK(lruk) => lruk.get(key),
        }
    }

    /// Remove a key. Returns `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::LruK(lruk) => lruk.remove(key),
        }
    }

    pub fn take(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.take(key),
            CacheInner::LruK(lruk) => lruk.take(key),
        }
    }

    /// Check if a key exists without recording an access.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::LruK(lruk) => lruk.contains(key),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::LruK(lruk) => lruk.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::LruK(lruk) => lruk.capacity(),
        }
    }

    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::LruK(lruk) => lruk.clear(),
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        Cache::put(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        Cache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        Cache::contains(self, key)
    }

    fn len(&self) -> usize {
        Cache::len(self)
    }

    fn capacity(&self) -> usize {
        Cache::capacity(self)
    }

    fn clear(&mut self) {
        Cache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Ord + Clone,
{
    fn take(&mut self, key: &K) -> Option<V> {
        Cache::take(self, key)
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Ord + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            CacheInner::Lru(lru) => f.debug_tuple("Cache").field(lru).finish(),
            CacheInner::LruK(lruk) => f.debug_tuple("Cache").field(lruk).finish(),
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    capacity: usize,
    #[cfg(feature = "concurrency")]
    shards: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            #[cfg(feature = "concurrency")]
            shards: 1,
        }
    }

    /// Number of shards for [`try_build_sharded`](Self::try_build_sharded).
    #[cfg(feature = "concurrency")]
    pub fn shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics on invalid configuration (zero capacity or zero K).
    ///
    /// # Example
    ///
    /// ```rust
    /// use lrukit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// let lru_3 = CacheBuilder::new(100).build::<u64, String>(CachePolicy::LruK { k: 3 });
    /// assert_eq!(lru_3.policy(), CachePolicy::LruK { k: 3 });
    /// # let _ = lru;
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Ord + Clone,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build a cache, reporting invalid configuration as an error.
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Ord + Clone,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::try_new(self.capacity)?),
            CachePolicy::LruK { k } => CacheInner::LruK(LrukCache::try_with_k(self.capacity, k)?),
        };
        Ok(Cache { inner })
    }

    /// Build a thread-safe LRU-K cache split across the configured shards.
    ///
    /// ```rust
    /// use lrukit::builder::CacheBuilder;
    ///
    /// let cache = CacheBuilder::new(64).shards(4).try_build_sharded::<u64, u64>(2).unwrap();
    /// assert_eq!(cache.shard_count(), 4);
    /// ```
    #[cfg(feature = "concurrency")]
    pub fn try_build_sharded<K, V>(self, k: usize) -> Result<ShardedLrukCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Ord + Clone,
    {
        ShardedLrukCache::try_new(self.capacity, k, self.shards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_policies_share_basic_ops() {
        let policies = [CachePolicy::Lru, CachePolicy::LruK { k: 1 }, CachePolicy::LruK { k: 2 }];

        for policy in policies {
            let mut cache = CacheBuilder::new(10).build::<u64, String>(policy);
            assert_eq!(cache.policy(), policy);

            assert_eq!(cache.put(1, "one".to_string()), None);
            assert_eq!(cache.put(2, "two".to_string()), None);

            assert_eq!(cache.get(&1), Some(&"one".to_string()));
            assert_eq!(cache.get(&2), Some(&"two".to_string()));
            assert_eq!(cache.get(&3), None);

            assert!(cache.contains(&1));
            assert!(!cache.contains(&99));
            assert_eq!(cache.len(), 2);

            assert_eq!(cache.put(1, "ONE".to_string()), Some("one".to_string()));
            assert_eq!(cache.get(&1), Some(&"ONE".to_string()));

            assert!(cache.remove(&2));
            assert!(!cache.remove(&2));

            cache.clear();
            assert!(cache.is_empty());
        }
    }

    #[test]
    fn lru_capacity_enforcement() {
        let mut cache = CacheBuilder::new(2).build::<u64, &str>(CachePolicy::Lru);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn invalid_configuration_reported() {
        assert!(CacheBuilder::new(0).try_build::<u8, u8>(CachePolicy::Lru).is_err());
        assert!(
            CacheBuilder::new(4)
                .try_build::<u8, u8>(CachePolicy::LruK { k: 0 })
                .is_err()
        );
    }

    #[test]
    fn default_policy_is_lru_2() {
        assert_eq!(CachePolicy::default(), CachePolicy::LruK { k: 2 });
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn sharded_build_respects_shard_count() {
        let cache = CacheBuilder::new(8)
            .shards(2)
            .try_build_sharded::<u32, u32>(2)
            .unwrap();
        assert_eq!(cache.shard_count(), 2);
        assert!(CacheBuilder::new(8).shards(0).try_build_sharded::<u32, u32>(2).is_err());
    }
}
