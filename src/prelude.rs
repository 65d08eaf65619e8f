pub use crate::builder::{CacheBuilder, DEFAULT_CAPACITY};
pub use crate::ds::{ListTag, NodePool, OrderedList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::LfuMetricsSnapshot;
pub use crate::policy::lfu::LfuCache;
pub use crate::traits::{CoreCache, LfuCacheTrait};
