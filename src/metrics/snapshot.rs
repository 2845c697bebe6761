#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub clear_calls: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub recency_rank_scan_steps: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruKMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub evict_skipped: u64, // overflowing puts that found no full-history entry
    pub promotions: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub clear_calls: u64,

    pub pop_lru_k_calls: u64,
    pub pop_lru_k_found: u64,
    pub peek_lru_k_calls: u64,
    pub peek_lru_k_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub k_distance_rank_calls: u64,
    pub k_distance_rank_found: u64,

    pub cache_len: usize,
    pub evictable_len: usize,
    pub capacity: usize,
    pub now: u64,
}

impl LruKMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

impl LruMetricsSnapshot {
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
