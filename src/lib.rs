//! lrukit: history-aware cache eviction.
//!
//! Two capacity-bounded caches share one contract (`put`, `get`, `remove`,
//! `contains`, `len`):
//!
//! - [`policy::lru_k::LrukCache`] evicts the entry whose K-th most recent
//!   access is oldest. Entries seen fewer than K times are never victims.
//! - [`policy::lru::LruCache`] is the K = 1 case as a plain recency list.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let mut cache = LrukCache::with_k(2, 2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.get(&"b");
//! cache.get(&"a");
//!
//! // "b" now has the oldest second-most-recent access.
//! cache.put("c", 3);
//! assert!(!cache.contains(&"b"));
//! assert!(cache.contains(&"a"));
//! ```
//!
//! Optional features: `metrics` (operation counters and snapshots),
//! `concurrency` (mutex-guarded and sharded wrappers), `dhat-heap` (heap
//! profiling binary).

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
