//! # Metrics Trait Hierarchy
//!
//! Mirrors the cache trait design: a core recorder shared by every policy,
//! extended per policy with the signals only that policy produces.
//!
//! ```text
//!                  ┌─────────────────────────────┐
//!                  │     CoreMetricsRecorder     │
//!                  │  get_hit/get_miss/put       │
//!                  │  evict/remove/clear         │
//!                  └──────────────┬──────────────┘
//!                                 │
//!                ┌────────────────┴────────────────┐
//!                ▼                                 ▼
//!         ┌──────────────┐                  ┌──────────────┐
//!         │     Lru      │                  │    LruK      │
//!         │   Recorder   │                  │   Recorder   │
//!         └──────────────┘                  └──────────────┘
//!
//!   &self paths (peek, rank) record through *ReadRecorder, implemented on
//!   `&Metrics` with interior-mutable cells.
//!
//!   Consumption: MetricsSnapshotProvider<S> (tests, benches, monitoring).
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_put_call(&mut self);
    fn record_put_new(&mut self);
    fn record_put_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-only LRU metrics for `&self` methods.
pub trait LruMetricsReadRecorder {
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Metrics for LRU-K behavior (history depth and K-distance ordering).
pub trait LruKMetricsRecorder: CoreMetricsRecorder {
    /// An overflowing put found no evictable entry and admitted anyway.
    fn record_evict_skipped(&mut self);
    /// An entry reached K recorded accesses and joined the eviction ordering.
    fn record_promotion(&mut self);
    fn record_pop_lru_k_call(&mut self);
    fn record_pop_lru_k_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-only LRU-K metrics for `&self` methods.
pub trait LruKMetricsReadRecorder {
    fn record_peek_lru_k_call(&self);
    fn record_peek_lru_k_found(&self);
    fn record_k_distance_rank_call(&self);
    fn record_k_distance_rank_found(&self);
}

/// Produces a point-in-time copy of a cache's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
