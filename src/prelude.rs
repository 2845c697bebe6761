pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::ds::{AccessHistory, EvictionOrder, LogicalClock};
pub use crate::error::{CacheError, ClockExhausted, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{LruKMetricsSnapshot, LruMetricsSnapshot};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
pub use crate::policy::lru::LruCache;
#[cfg(feature = "concurrency")]
pub use crate::policy::lru_k::{ConcurrentLrukCache, ShardedLrukCache};
pub use crate::policy::lru_k::LrukCache;
pub use crate::traits::{CoreCache, LruCacheTrait, LrukCacheTrait, MutableCache};
#[cfg(feature = "concurrency")]
pub use crate::traits::ConcurrentCache;
