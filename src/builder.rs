//! Cache configuration.
//!
//! [`CacheBuilder`] collects the sizing parameters of an
//! [`LfuCache`](crate::policy::lfu::LfuCache) and builds it. Capacities read
//! from signed configuration values go through
//! [`CacheBuilder::from_signed`], which rejects negatives instead of clamping.
//!
//! ## Example
//!
//! ```rust
//! use lfukit::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .bucket_hint(32)
//!     .build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! assert!(CacheBuilder::from_signed(-1).is_err());
//! ```

use std::hash::Hash;

use log::warn;

use crate::error::ConfigError;
use crate::policy::lfu::LfuCache;

/// Capacity used by [`CacheBuilder::default`] and `LfuCache::default`.
pub const DEFAULT_CAPACITY: usize = 5;

/// Distinct frequencies pre-sized for when no hint is given.
pub const DEFAULT_BUCKET_HINT: usize = 16;

/// Upper bound on up-front allocation, in slots.
pub(crate) const MAX_PREALLOC: usize = 1 << 16;

/// Validates a signed capacity.
pub(crate) fn checked_capacity(capacity: i64) -> Result<usize, ConfigError> {
    if capacity < 0 {
        warn!("rejected lfu capacity {capacity}: negative");
        return Err(ConfigError::NegativeCapacity(capacity));
    }
    usize::try_from(capacity).map_err(|_| {
        warn!("rejected lfu capacity {capacity}: exceeds usize");
        ConfigError::CapacityOverflow(capacity)
    })
}

/// Builder for [`LfuCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
    bucket_hint: usize,
}

impl CacheBuilder {
    /// Creates a builder for a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            bucket_hint: DEFAULT_BUCKET_HINT,
        }
    }

    /// Creates a builder from a signed capacity.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NegativeCapacity`] for values below zero,
    /// [`ConfigError::CapacityOverflow`] if the value does not fit in `usize`.
    pub fn from_signed(capacity: i64) -> Result<Self, ConfigError> {
        checked_capacity(capacity).map(Self::new)
    }

    /// Pre-sizes bucket storage for `hint` distinct access counts.
    pub fn bucket_hint(mut self, hint: usize) -> Self {
        self.bucket_hint = hint;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn build<K, V>(self) -> LfuCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        LfuCache::with_bucket_hint(self.capacity, self.bucket_hint)
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
