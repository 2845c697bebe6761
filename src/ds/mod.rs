pub mod access_history;
pub mod eviction_order;
pub mod intrusive_list;
pub mod logical_clock;
#[cfg(feature = "concurrency")]
pub mod shard;
pub mod slot_arena;

pub use access_history::AccessHistory;
pub use eviction_order::EvictionOrder;
pub use intrusive_list::IntrusiveList;
pub use logical_clock::LogicalClock;
#[cfg(feature = "concurrency")]
pub use shard::ShardSelector;
pub use slot_arena::{SlotArena, SlotId};
