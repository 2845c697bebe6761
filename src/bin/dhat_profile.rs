//! DHAT heap profiler for lrukit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>
//!
//! Set `RUST_LOG=lrukit=debug` to see admissions that found no evictable entry.

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use lrukit::policy::lru::LruCache;
use lrukit::policy::lru_k::LrukCache;
use lrukit::traits::CoreCache;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CAPACITY: usize = 4096;
const OPERATIONS: usize = 100_000;
const UNIVERSE: u64 = 16_384;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// Hotset workload: 90% of accesses hit 10% of keys.
fn hotset_workload<C: CoreCache<u64, u64>>(cache: &mut C, operations: usize, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = UNIVERSE / 10;

    for _ in 0..operations {
        let key = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (UNIVERSE - hot_size))
        };

        if cache.get(&key).is_none() {
            cache.put(key, key);
        }
    }
}

/// Sequential scan over the whole key universe.
fn scan_workload<C: CoreCache<u64, u64>>(cache: &mut C, operations: usize) {
    for i in 0..operations {
        let key = (i as u64) % UNIVERSE;
        if cache.get(&key).is_none() {
            cache.put(key, key);
        }
    }
}

/// Insert keys never seen before.
fn eviction_churn<C: CoreCache<u64, u64>>(cache: &mut C, operations: usize) {
    for i in 0..operations {
        let key = UNIVERSE + i as u64;
        cache.put(key, key);
    }
}

fn run_workloads<C: CoreCache<u64, u64>>(cache: &mut C) {
    for i in 0..CAPACITY as u64 {
        cache.put(i, i);
    }
    hotset_workload(cache, OPERATIONS, 42);
    scan_workload(cache, OPERATIONS / 2);
    eviction_churn(cache, OPERATIONS / 4);
}

fn profile_lru() {
    let mut cache = LruCache::new(CAPACITY);
    run_workloads(&mut cache);
    info!(len = cache.len(), capacity = CAPACITY, "LRU done");
}

fn profile_lru_k(k: usize) {
    let mut cache = LrukCache::with_k(CAPACITY, k);
    run_workloads(&mut cache);
    info!(
        k,
        len = cache.len(),
        evictable = cache.evictable_len(),
        capacity = CAPACITY,
        now = cache.now(),
        "LRU-K done"
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let _profiler = dhat::Profiler::new_heap();

    profile_lru();
    profile_lru_k(1);
    profile_lru_k(2);
    profile_lru_k(3);

    info!("profiling complete, results written to dhat-heap.json");
}
