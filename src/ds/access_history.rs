//! Bounded per-entry access history.
//!
//! Stores the last `K` access timestamps of a cache entry, with the depth
//! chosen at runtime. Recording is O(1); the oldest retained timestamp (the
//! backward K-distance anchor) is O(1).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                      AccessHistory (capacity = 4)                           │
//! │                                                                             │
//! │   data: VecDeque<u64>, oldest at the front, at most `capacity` long         │
//! │                                                                             │
//! │   After recording: 10, 20                                                   │
//! │            ┌─────┬─────┐                                                    │
//! │   data:    │ 10  │ 20  │            storage grows with the records          │
//! │            └─────┴─────┘                                                    │
//! │                                                                             │
//! │   After recording: 10, 20, 30, 40, 50                                       │
//! │            ┌─────┬─────┬─────┬─────┐                                        │
//! │   data:    │ 20  │ 30  │ 40  │ 50  │  full: each record pops the front      │
//! │            └─────┴─────┴─────┴─────┘                                        │
//! │               ▲                                                             │
//! │           oldest() = 20                                                     │
//! │                                                                             │
//! │   kth_most_recent(n) = data[len - n]                                        │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage is allocated as timestamps arrive, so an entry seen once costs one
//! slot whatever the configured depth.
//!
//! ## Full-history transition
//!
//! [`record`](AccessHistory::record) returns `true` exactly once in the
//! lifetime of a history: on the call that brings it to `capacity` entries.
//! Later records replace the oldest timestamp and return `false`. The LRU-K
//! cache uses this edge to register an entry with its eviction ordering.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::ds::AccessHistory;
//!
//! let mut history = AccessHistory::new(3);
//!
//! assert!(!history.record(100));
//! assert!(!history.record(200));
//! assert!(history.record(300)); // now full
//!
//! assert_eq!(history.oldest(), Some(100));
//! assert_eq!(history.most_recent(), Some(300));
//!
//! // Overwrites oldest when full
//! assert!(!history.record(400));
//! assert_eq!(history.oldest(), Some(200));
//! assert_eq!(history.to_vec_mru(), vec![400, 300, 200]);
//! ```
//!
//! ## Thread Safety
//!
//! `AccessHistory` is not thread-safe. It is embedded within cache entries and
//! protected by the cache's own synchronization, if any.

use std::collections::VecDeque;

/// Bounded queue of the last `capacity` access timestamps.
#[derive(Debug, Clone)]
pub struct AccessHistory {
    data: VecDeque<u64>,
    capacity: usize,
}

impl AccessHistory {
    /// Creates an empty history retaining at most `capacity` timestamps.
    ///
    /// Nothing is allocated until the first record. A zero-capacity history
    /// never records anything.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::new(),
            capacity,
        }
    }

    /// Returns the maximum number of timestamps retained.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of timestamps currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no timestamp has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` once `capacity` timestamps have been recorded.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.data.len() == self.capacity
    }

    /// Records a timestamp, dropping the oldest if the history is full.
    ///
    /// Returns `true` if this call moved the history into the full state.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::ds::AccessHistory;
    ///
    /// let mut history = AccessHistory::new(2);
    /// assert!(!history.record(10));
    /// assert!(history.record(20));
    /// assert!(!history.record(30));
    /// assert_eq!(history.to_vec_mru(), vec![30, 20]);
    /// ```
    pub fn record(&mut self, timestamp: u64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.data.len() == self.capacity {
            self.data.pop_front();
            self.data.push_back(timestamp);
            return false;
        }
        self.data.push_back(timestamp);
        self.data.len() == self.capacity
    }

    /// Returns the earliest retained timestamp.
    ///
    /// For a full history this is the K-th most recent access, the anchor of
    /// the entry's backward K-distance. Returns `None` if nothing was recorded.
    #[inline]
    pub fn oldest(&self) -> Option<u64> {
        self.data.front().copied()
    }

    /// Returns the most recently recorded timestamp.
    #[inline]
    pub fn most_recent(&self) -> Option<u64> {
        self.data.back().copied()
    }

    /// Returns the n-th most recent timestamp (`n = 1` is most recent).
    ///
    /// Returns `None` if `n` is 0 or exceeds the number of recorded timestamps.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::ds::AccessHistory;
    ///
    /// let mut history = AccessHistory::new(4);
    /// history.record(10);
    /// history.record(20);
    /// history.record(30);
    ///
    /// assert_eq!(history.kth_most_recent(1), Some(30));
    /// assert_eq!(history.kth_most_recent(3), Some(10));
    /// assert_eq!(history.kth_most_recent(0), None);
    /// assert_eq!(history.kth_most_recent(4), None);
    /// ```
    pub fn kth_most_recent(&self, n: usize) -> Option<u64> {
        if n == 0 || n > self.data.len() {
            return None;
        }
        self.data.get(self.data.len() - n).copied()
    }

    /// Returns timestamps from most recent to oldest.
    pub fn to_vec_mru(&self) -> Vec<u64> {
        self.iter().collect()
    }

    /// Returns an iterator over recorded timestamps, most recent first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.data.iter().rev(),
        }
    }

    /// Forgets all recorded timestamps. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.data.len() <= self.capacity);
        // Timestamps come from a monotonic clock, so insertion order is strictly increasing.
        assert!(
            self.data
                .iter()
                .zip(self.data.iter().skip(1))
                .all(|(a, b)| a < b)
        );
    }
}

impl PartialEq for AccessHistory {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity && self.data == other.data
    }
}

impl Eq for AccessHistory {}

/// Borrowed iterator over an [`AccessHistory`], from most recent to oldest.
///
/// Created by [`AccessHistory::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::iter::Rev<std::collections::vec_deque::Iter<'a, u64>>,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a AccessHistory {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
