//! Sorted eviction-candidate set keyed by backward K-distance anchor.
//!
//! Holds one position per eligible entry: the entry's anchor timestamp (the
//! oldest timestamp in its full access history) and its key. Positions sort
//! by anchor ascending, then by key ascending, so the first position is the
//! entry whose K-th most recent access lies furthest in the past.
//!
//! ## Architecture
//!
//! ```text
//!   BTreeSet<(anchor, key)>
//!
//!   first ─► (3, "b") ─ (5, "a") ─ (5, "c") ─ (9, "d") ◄─ last
//!            victim      tie on anchor, broken by key
//! ```
//!
//! ## Reposition discipline
//!
//! An entry's anchor changes whenever its history advances. The position is
//! the set's sort key, so it must never be mutated in place: the old position
//! is taken out and a new one inserted. [`reposition`](EvictionOrder::reposition)
//! bundles both halves so callers cannot do one without the other.
//!
//! ## Operations
//!
//! | Operation     | Description                          | Complexity |
//! |---------------|--------------------------------------|------------|
//! | `insert`      | Add a position                       | O(log n)   |
//! | `remove`      | Remove a position by identity        | O(log n)   |
//! | `reposition`  | Move a key from one anchor to another| O(log n)   |
//! | `first`       | Peek the eviction victim             | O(log n)   |
//! | `pop_first`   | Remove the eviction victim           | O(log n)   |
//! | `rank_of`     | Position index of a key              | O(n)       |
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::ds::EvictionOrder;
//!
//! let mut order = EvictionOrder::new();
//! order.insert("a", 5);
//! order.insert("b", 3);
//! order.insert("c", 5);
//!
//! assert_eq!(order.first(), Some((3, &"b")));
//!
//! // "b" was accessed again; its anchor moves forward
//! assert!(order.reposition(&"b", 3, 8));
//! assert_eq!(order.first(), Some((5, &"a")));
//!
//! assert_eq!(order.pop_first(), Some((5, "a")));
//! assert_eq!(order.pop_first(), Some((5, "c")));
//! assert_eq!(order.pop_first(), Some((8, "b")));
//! assert!(order.is_empty());
//! ```

use std::collections::BTreeSet;

/// Ordered set of `(anchor, key)` eviction positions.
#[derive(Debug, Clone)]
pub struct EvictionOrder<K> {
    set: BTreeSet<(u64, K)>,
}

impl<K> EvictionOrder<K>
where
    K: Ord + Clone,
{
    /// Creates an empty ordering.
    pub fn new() -> Self {
        Self {
            set: BTreeSet::new(),
        }
    }

    /// Returns the number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if there is no eviction candidate.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Inserts `key` at `anchor`. Returns `false` if that exact position exists.
    pub fn insert(&mut self, key: K, anchor: u64) -> bool {
        self.set.insert((anchor, key))
    }

    /// Removes the position `(anchor, key)`. Returns `false` if absent.
    pub fn remove(&mut self, key: &K, anchor: u64) -> bool {
        self.set.remove(&(anchor, key.clone()))
    }

    /// Returns `true` if `(anchor, key)` is a position in the ordering.
    pub fn contains(&self, key: &K, anchor: u64) -> bool {
        self.set.contains(&(anchor, key.clone()))
    }

    /// Moves `key` from `old_anchor` to `new_anchor`.
    ///
    /// Returns `false` and leaves the ordering untouched if `key` was not at
    /// `old_anchor`.
    pub fn reposition(&mut self, key: &K, old_anchor: u64, new_anchor: u64) -> bool {
        match self.set.take(&(old_anchor, key.clone())) {
            Some((_, owned)) => {
                self.set.insert((new_anchor, owned));
                true
            },
            None => false,
        }
    }

    /// Returns the best eviction candidate without removing it.
    pub fn first(&self) -> Option<(u64, &K)> {
        self.set.first().map(|(anchor, key)| (*anchor, key))
    }

    /// Removes and returns the best eviction candidate.
    pub fn pop_first(&mut self) -> Option<(u64, K)> {
        self.set.pop_first()
    }

    /// Returns how many positions sort before `(anchor, key)`, or `None` if
    /// that position is absent. Rank 0 is the next victim.
    pub fn rank_of(&self, key: &K, anchor: u64) -> Option<usize> {
        let probe = (anchor, key.clone());
        if !self.set.contains(&probe) {
            return None;
        }
        Some(self.set.range(..probe).count())
    }

    /// Iterates positions from first victim to last.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &K)> {
        self.set.iter().map(|(anchor, key)| (*anchor, key))
    }

    /// Removes every position.
    pub fn clear(&mut self) {
        self.set.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let positions: Vec<_> = self.iter().collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(positions.len(), self.len());
    }
}

impl<K> Default for EvictionOrder<K>
where
    K: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_anchor_then_key() {
        let mut order = EvictionOrder::new();
        order.insert(30u32, 7);
        order.insert(10u32, 9);
        order.insert(20u32, 7);

        let seen: Vec<_> = order.iter().collect();
        assert_eq!(seen, vec![(7, &20), (7, &30), (9, &10)]);
        order.debug_validate_invariants();
    }

    #[test]
    fn remove_requires_exact_position() {
        let mut order = EvictionOrder::new();
        order.insert("a", 4);

        assert!(!order.remove(&"a", 5));
        assert!(!order.remove(&"b", 4));
        assert_eq!(order.len(), 1);

        assert!(order.remove(&"a", 4));
        assert!(order.is_empty());
    }

    #[test]
    fn reposition_moves_and_rejects_stale_anchor() {
        let mut order = EvictionOrder::new();
        order.insert("a", 1);
        order.insert("b", 2);

        assert!(order.reposition(&"a", 1, 3));
        assert!(!order.contains(&"a", 1));
        assert!(order.contains(&"a", 3));
        assert_eq!(order.first(), Some((2, &"b")));

        // Stale anchor: nothing changes.
        assert!(!order.reposition(&"a", 1, 10));
        assert!(order.contains(&"a", 3));
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn rank_counts_positions_before_key() {
        let mut order = EvictionOrder::new();
        for (key, anchor) in [("a", 5), ("b", 1), ("c", 3)] {
            order.insert(key, anchor);
        }

        assert_eq!(order.rank_of(&"b", 1), Some(0));
        assert_eq!(order.rank_of(&"c", 3), Some(1));
        assert_eq!(order.rank_of(&"a", 5), Some(2));
        assert_eq!(order.rank_of(&"a", 4), None);
    }

    #[test]
    fn pop_first_drains_in_order() {
        let mut order = EvictionOrder::new();
        order.insert(2u8, 20);
        order.insert(1u8, 10);
        order.insert(3u8, 10);

        assert_eq!(order.pop_first(), Some((10, 1)));
        assert_eq!(order.pop_first(), Some((10, 3)));
        assert_eq!(order.pop_first(), Some((20, 2)));
        assert_eq!(order.pop_first(), None);
        assert_eq!(order.first(), None);
    }

    #[test]
    fn clear_empties_ordering() {
        let mut order = EvictionOrder::new();
        order.insert(1u8, 1);
        order.clear();
        assert!(order.is_empty());
    }
}
