//! lfukit: a constant-time LFU cache and the arena-backed lists it is built on.
//!
//! - [`ds`]: slot arena and the ordered node list
//! - [`policy::lfu`]: the frequency-bucketed cache
//! - [`builder`]: configuration
//!
//! ```
//! use lfukit::prelude::*;
//!
//! let mut cache: LfuCache<&str, u32> = CacheBuilder::new(2).build();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);
//! assert!(!cache.contains(&"b"));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
