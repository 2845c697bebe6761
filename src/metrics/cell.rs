use std::cell::Cell;

/// Counter incremented from `&self` methods (peeks, rank queries).
///
/// A plain `Cell`: it is `Send` but not `Sync`, so a cache carrying these
/// counters can move between threads but cannot be shared by reference.
/// Shared access goes through the `concurrency` wrappers, whose mutex only
/// requires the cache to be `Send`.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(MetricsCell: Send);
    static_assertions::assert_not_impl_any!(MetricsCell: Sync);

    #[test]
    fn incr_counts_from_shared_reference() {
        let cell = MetricsCell::new();
        let shared = &cell;
        shared.incr();
        shared.incr();
        assert_eq!(cell.get(), 2);
    }
}
