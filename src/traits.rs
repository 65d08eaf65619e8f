//! # Cache Traits
//!
//! Trait seam between cache implementations and generic callers.
//!
//! ```text
//!   ┌─────────────────────────────────────┐
//!   │          CoreCache<K, V>            │
//!   │                                     │
//!   │  put(&mut, K, V)                    │
//!   │  get(&mut, &K) → Option<&V>         │
//!   │  contains(&, &K) → bool             │
//!   │  len(&) → usize                     │
//!   │  is_empty(&) → bool                 │
//!   │  capacity(&) → usize                │
//!   │  clear(&mut)                        │
//!   └─────────────────┬───────────────────┘
//!                     │
//!                     ▼
//!   ┌─────────────────────────────────────┐
//!   │        LfuCacheTrait<K, V>          │
//!   │                                     │
//!   │  pop_lfu() → Option<(K, V)>         │
//!   │  peek_lfu() → Option<(&K, &V)>      │
//!   │  frequency(&K) → Option<u64>        │
//!   └─────────────────────────────────────┘
//! ```
//!
//! `get` may change eviction state; `contains` never does.

/// Operations every bounded cache supports.
pub trait CoreCache<K, V> {
    /// Inserts or updates a key. May evict when the cache is full.
    ///
    /// # Example
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    /// use lfukit::traits::CoreCache;
    ///
    /// fn warm<C: CoreCache<u32, u32>>(cache: &mut C) {
    ///     for i in 0..10 {
    ///         cache.put(i, i);
    ///     }
    /// }
    ///
    /// let mut cache = LfuCache::new(4);
    /// warm(&mut cache);
    /// assert_eq!(CoreCache::len(&cache), 4);
    /// ```
    fn put(&mut self, key: K, value: V);

    /// Looks up a key, updating eviction state on a hit.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks for a key without updating eviction state.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Frequency-based eviction operations.
pub trait LfuCacheTrait<K, V>: CoreCache<K, V> {
    /// Removes and returns the entry the next eviction would pick.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Returns the entry the next eviction would pick, without removing it.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Access count of `key`, or `None` if it is not cached.
    fn frequency(&self, key: &K) -> Option<u64>;
}
