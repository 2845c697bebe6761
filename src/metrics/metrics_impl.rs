use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, LruKMetricsReadRecorder, LruKMetricsRecorder, LruMetricsReadRecorder,
    LruMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct LruMetrics {
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
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

#[derive(Debug, Default)]
pub struct LruKMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub evict_skipped: u64,
    pub promotions: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub clear_calls: u64,
    pub pop_lru_k_calls: u64,
    pub pop_lru_k_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub peek_lru_k_calls: MetricsCell,
    pub peek_lru_k_found: MetricsCell,
    pub k_distance_rank_calls: MetricsCell,
    pub k_distance_rank_found: MetricsCell,
}

macro_rules! impl_core_recorder {
    ($metrics:ty) => {
        impl CoreMetricsRecorder for $metrics {
            fn record_get_hit(&mut self) {
                self.get_calls += 1;
                self.get_hits += 1;
            }

            fn record_get_miss(&mut self) {
                self.get_calls += 1;
                self.get_misses += 1;
            }

            fn record_put_call(&mut self) {
                self.put_calls += 1;
            }

            fn record_put_new(&mut self) {
                self.put_new += 1;
            }

            fn record_put_update(&mut self) {
                self.put_updates += 1;
            }

            fn record_evict_call(&mut self) {
                self.evict_calls += 1;
            }

            fn record_evicted_entry(&mut self) {
                self.evicted_entries += 1;
            }

            fn record_remove_call(&mut self) {
                self.remove_calls += 1;
            }

            fn record_remove_found(&mut self) {
                self.remove_found += 1;
            }

            fn record_clear(&mut self) {
                self.clear_calls += 1;
            }
        }
    };
}

impl_core_recorder!(LruMetrics);
impl_core_recorder!(LruKMetrics);

impl LruMetricsRecorder for LruMetrics {
    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl LruMetricsReadRecorder for &LruMetrics {
    fn record_peek_lru_call(&self) {
        self.peek_lru_calls.incr();
    }

    fn record_peek_lru_found(&self) {
        self.peek_lru_found.incr();
    }

    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }
}

impl LruKMetricsRecorder for LruKMetrics {
    fn record_evict_skipped(&mut self) {
        self.evict_skipped += 1;
    }

    fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    fn record_pop_lru_k_call(&mut self) {
        self.pop_lru_k_calls += 1;
    }

    fn record_pop_lru_k_found(&mut self) {
        self.pop_lru_k_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl LruKMetricsReadRecorder for &LruKMetrics {
    fn record_peek_lru_k_call(&self) {
        self.peek_lru_k_calls.incr();
    }

    fn record_peek_lru_k_found(&self) {
        self.peek_lru_k_found.incr();
    }

    fn record_k_distance_rank_call(&self) {
        self.k_distance_rank_calls.incr();
    }

    fn record_k_distance_rank_found(&self) {
        self.k_distance_rank_found.incr();
    }
}
