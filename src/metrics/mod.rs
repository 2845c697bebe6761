//! Operation counters for cache policies (feature `metrics`).
//!
//! Recording, snapshotting and reading are split into small traits so cache
//! code only ever writes counters:
//!
//! - [`traits`]: recorder traits implemented by the per-policy counter structs
//! - [`metrics_impl`]: [`LruMetrics`](metrics_impl::LruMetrics) and
//!   [`LruKMetrics`](metrics_impl::LruKMetrics)
//! - [`snapshot`]: plain `Copy` snapshots handed out by
//!   `metrics_snapshot()` on each cache
//! - [`cell`]: counter cell for methods that only have `&self`

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
