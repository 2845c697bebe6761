// ==============================================
// CONCURRENT WRAPPER TESTS (integration)
// ==============================================
//
// Multi-threaded access through the mutex-guarded and sharded LRU-K
// wrappers. Index and eviction order must never be observed out of step.

#![cfg(feature = "concurrency")]

use std::sync::{Arc, Barrier};
use std::thread;

use lrukit::policy::lru_k::{ConcurrentLrukCache, ShardedLrukCache};
use lrukit::traits::ConcurrentCache;

fn assert_concurrent<C: ConcurrentCache>(_: &C) {}

mod shared_cache {
    use super::*;

    #[test]
    fn parallel_puts_and_gets_keep_invariants() {
        let cache: ConcurrentLrukCache<u64, u64> = ConcurrentLrukCache::with_k(64, 2);
        assert_concurrent(&cache);
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let cache = cache.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..2_000u64 {
                        let key = (i * 7 + t as u64) % 128;
                        if cache.get(&key).is_none() {
                            cache.put(key, key * 10);
                        }
                        if i % 50 == 0 {
                            cache.remove(&((key + 1) % 128));
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.check_invariants().is_ok());
        cache.with_inner(|inner| {
            for key in 0..128u64 {
                if let Some(value) = inner.peek(&key) {
                    assert_eq!(*value, key * 10);
                }
            }
        });
    }

    #[test]
    fn clock_ticks_once_per_access_across_threads() {
        let cache: ConcurrentLrukCache<u64, u64> = ConcurrentLrukCache::with_k(1024, 2);
        for key in 0..16 {
            cache.put(key, key);
        }
        let threads = 4;
        let per_thread = 500u64;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..per_thread {
                        cache.touch(&(i % 16));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let now = cache.with_inner(|inner| inner.now());
        assert_eq!(now, 16 + threads as u64 * per_thread);
    }
}

mod sharded_cache {
    use super::*;

    #[test]
    fn sharded_cache_serves_every_thread() {
        let cache: Arc<ShardedLrukCache<u64, String>> =
            Arc::new(ShardedLrukCache::try_new(256, 2, 8).unwrap());
        assert_concurrent(cache.as_ref());
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let base = t as u64 * 1_000;
                    for i in 0..200u64 {
                        cache.put(base + i, format!("{}", base + i));
                        cache.get(&(base + i));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.check_invariants().is_ok());
        assert!(!cache.is_empty());
        // Every entry got two accesses, so every shard can evict down to its share.
        assert!(cache.len() <= cache.capacity());
    }
}
