//! Error types for the lfukit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (e.g. a negative capacity coming from a signed configuration value).
//! - [`InvariantError`]: Returned by `check_invariants` methods when internal
//!   data-structure invariants are violated.
//!
//! A missing key is not an error: lookups return `Option`.
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::error::ConfigError;
//! use lfukit::policy::lfu::LfuCache;
//!
//! let cache: Result<LfuCache<String, i32>, ConfigError> = LfuCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! let bad = LfuCache::<String, i32>::try_new(-1);
//! assert!(bad.is_err());
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` on [`LfuCache`](crate::policy::lfu::LfuCache)
/// and [`OrderedList`](crate::ds::OrderedList). Carries a human-readable
/// description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
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

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// # Example
///
/// ```
/// use lfukit::builder::CacheBuilder;
///
/// let err = CacheBuilder::from_signed(-3).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Capacity was below zero.
    #[error("capacity must be non-negative, got {0}")]
    NegativeCapacity(i64),
    /// Capacity does not fit in `usize` on this platform.
    #[error("capacity {0} does not fit in usize")]
    CapacityOverflow(i64),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("bucket order broken");
        assert_eq!(err.to_string(), "bucket order broken");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("len mismatch");
        assert_eq!(err.message(), "len mismatch");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn negative_capacity_display() {
        let err = ConfigError::NegativeCapacity(-7);
        assert_eq!(err.to_string(), "capacity must be non-negative, got -7");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::CapacityOverflow(1);
        assert_eq!(a.clone(), a);
        assert_ne!(a, ConfigError::NegativeCapacity(-1));
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}
