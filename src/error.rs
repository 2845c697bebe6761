//! Error types for the lrukit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity, zero K, zero shards).
//! - [`ClockExhausted`]: Returned when the logical clock cannot issue another
//!   timestamp. Unrecoverable for the cache instance that hit it.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods, empty-history reads).
//! - [`CacheError`]: Union of the failures a recording operation can surface.
//!
//! Absent keys are never errors: `get` returns `None`, `remove` returns `false`.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru_k::LrukCache;
//!
//! let cache: Result<LrukCache<String, i32>, ConfigError> = LrukCache::try_with_k(100, 2);
//! assert!(cache.is_ok());
//!
//! // Zero K is rejected without panicking
//! let bad = LrukCache::<String, i32>::try_with_k(100, 0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on cache types and by history reads
/// that find no recorded access. Reaching one through the public API means
/// the cache has a defect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LrukCache::try_with_k`](crate::policy::lru_k::LrukCache::try_with_k)
/// and [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use lrukit::policy::lru_k::LrukCache;
///
/// let err = LrukCache::<u64, u64>::try_with_k(0, 2).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// ClockExhausted
// ---------------------------------------------------------------------------

/// The logical clock has issued its last representable timestamp.
///
/// This is an operational limit rather than a programming error. The cache
/// that returns it is left in its last consistent state but cannot record
/// further accesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockExhausted {
    last: u64,
}

impl ClockExhausted {
    #[inline]
    pub(crate) fn new(last: u64) -> Self {
        Self { last }
    }

    /// Returns the last timestamp the clock issued.
    #[inline]
    pub fn last(&self) -> u64 {
        self.last
    }
}

impl fmt::Display for ClockExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "logical clock exhausted at timestamp {}", self.last)
    }
}

impl std::error::Error for ClockExhausted {}

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Failure of an operation that records an access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// No timestamp could be issued; see [`ClockExhausted`].
    ClockExhausted(ClockExhausted),
    /// An internal invariant did not hold; see [`InvariantError`].
    Invariant(InvariantError),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::ClockExhausted(err) => err.fmt(f),
            CacheError::Invariant(err) => write!(f, "cache invariant violated: {}", err),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::ClockExhausted(err) => Some(err),
            CacheError::Invariant(err) => Some(err),
        }
    }
}

impl From<ClockExhausted> for CacheError {
    fn from(err: ClockExhausted) -> Self {
        CacheError::ClockExhausted(err)
    }
}

impl From<InvariantError> for CacheError {
    fn from(err: InvariantError) -> Self {
        CacheError::Invariant(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
