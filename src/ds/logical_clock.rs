//! Monotonic logical clock used as the timestamp source for access history.
//!
//! One tick is issued per recorded access across the whole cache, so two
//! accesses never share a timestamp. The clock starts at 0 and is never reset;
//! once it has issued `u64::MAX` every further [`tick`](LogicalClock::tick)
//! fails with [`ClockExhausted`].
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::ds::LogicalClock;
//!
//! let mut clock = LogicalClock::new();
//! assert_eq!(clock.now(), 0);
//! assert_eq!(clock.tick(), Ok(1));
//! assert_eq!(clock.tick(), Ok(2));
//! assert_eq!(clock.now(), 2);
//!
//! let mut nearly_done = LogicalClock::starting_at(u64::MAX - 1);
//! assert_eq!(nearly_done.tick(), Ok(u64::MAX));
//! assert!(nearly_done.tick().is_err());
//! ```

use crate::error::ClockExhausted;

/// Process-local monotonically increasing counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalClock {
    now: u64,
}

impl LogicalClock {
    /// Creates a clock reading 0.
    pub fn new() -> Self {
        Self { now: 0 }
    }

    /// Creates a clock whose next tick is `start + 1`.
    ///
    /// Useful for resuming a timestamp space or exercising the exhaustion path.
    pub fn starting_at(start: u64) -> Self {
        Self { now: start }
    }

    /// Returns the last issued timestamp (0 if none).
    #[inline]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Returns `true` if no further timestamp can be issued.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.now == u64::MAX
    }

    /// Checks that a tick would succeed without advancing the clock.
    #[inline]
    pub fn check(&self) -> Result<(), ClockExhausted> {
        if self.is_exhausted() {
            Err(ClockExhausted::new(self.now))
        } else {
            Ok(())
        }
    }

    /// Advances the clock and returns the new timestamp.
    ///
    /// The clock is left untouched on failure.
    #[inline]
    pub fn tick(&mut self) -> Result<u64, ClockExhausted> {
        self.now = self
            .now
            .checked_add(1)
            .ok_or(ClockExhausted::new(self.now))?;
        Ok(self.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_strictly_increasing() {
        let mut clock = LogicalClock::new();
        let mut last = clock.now();
        for _ in 0..100 {
            let ts = clock.tick().unwrap();
            assert!(ts > last);
            last = ts;
        }
        assert_eq!(clock.now(), 100);
    }

    #[test]
    fn exhausted_clock_does_not_move() {
        let mut clock = LogicalClock::starting_at(u64::MAX);
        assert!(clock.is_exhausted());
        assert!(clock.check().is_err());

        let err = clock.tick().unwrap_err();
        assert_eq!(err.last(), u64::MAX);
        assert_eq!(clock.now(), u64::MAX);
    }

    #[test]
    fn last_timestamp_is_issued() {
        let mut clock = LogicalClock::starting_at(u64::MAX - 1);
        assert!(clock.check().is_ok());
        assert_eq!(clock.tick(), Ok(u64::MAX));
        assert!(clock.is_exhausted());
    }
}
