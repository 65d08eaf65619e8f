//! # LFU (Least Frequently Used) Cache
//!
//! Bounded cache that evicts the entry with the lowest access count, breaking
//! ties by evicting the least recently touched entry at that count. `get`,
//! `put` and eviction are all O(1).
//!
//! ## Architecture
//!
//! The cache is a list of lists. The outer list holds one bucket per
//! frequency in use, ascending from head to tail. Each bucket holds its
//! entries oldest-first. Both levels are [`OrderedList`]s over their own
//! [`NodePool`], so moving an entry between buckets is a pop plus a push by
//! handle.
//!
//! ```text
//!   index: FxHashMap<K, SlotId>           frequencies: FxHashMap<u64, SlotId>
//!     "a" ─► e0   "b" ─► e1                 1 ─► b0   3 ─► b1
//!     "c" ─► e2   "d" ─► e3
//!
//!   bucket_list (NodePool<Bucket>)
//!   head ─► [b0 freq=1] ◄──────────────► [b1 freq=3] ◄── tail
//!               │                             │
//!               ▼                             ▼
//!     head ─► [e1 "b"] ◄─► [e3 "d"]   head ─► [e0 "a"] ◄─► [e2 "c"]
//!             LRU (evict first)  MRU          LRU               MRU
//! ```
//!
//! ## Frequency Bump (get / put on an existing key)
//!
//! ```text
//!   1. find the entry's bucket through `frequencies[freq]`
//!   2. pop the entry from that bucket
//!   3. freq += 1; find or create bucket freq+1 directly after the old one
//!   4. push the entry to the back (MRU) of the new bucket
//!   5. drop the old bucket if it is now empty
//! ```
//!
//! ## Eviction
//!
//! The head bucket holds the lowest frequency; its head entry is the least
//! recently touched one at that frequency. Both are O(1) to reach.
//!
//! ## Iteration
//!
//! [`LfuCache::iter`] walks buckets tail to head and each bucket tail to
//! head: descending frequency, most recently used first within a frequency.
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! assert_eq!(cache.get(&1), Some(&"one"));
//!
//! // key 2 has the lowest frequency
//! cache.put(3, "three");
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.frequency(&1), Some(2));
//!
//! let order: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
//! assert_eq!(order, vec![1, 3]);
//! ```
//!
//! ## Thread Safety
//!
//! `LfuCache` performs no locking. Wrap it in a `Mutex` to share it between
//! threads.

use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::builder::{checked_capacity, DEFAULT_BUCKET_HINT, DEFAULT_CAPACITY, MAX_PREALLOC};
use crate::ds::node_list::{self, NodePool, OrderedList};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{LfuMetrics, LfuMetricsSnapshot};
use crate::traits::{CoreCache, LfuCacheTrait};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    freq: u64,
}

#[derive(Debug)]
struct Bucket<K, V> {
    freq: u64,
    entries: OrderedList<Entry<K, V>>,
}

/// LFU cache with LRU tie-breaking.
///
/// See the module-level documentation for the layout.
pub struct LfuCache<K, V> {
    entries: NodePool<Entry<K, V>>,
    buckets: NodePool<Bucket<K, V>>,
    bucket_list: OrderedList<Bucket<K, V>>,
    index: FxHashMap<K, SlotId>,
    frequencies: FxHashMap<u64, SlotId>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is valid: such a cache never stores anything.
    pub fn new(capacity: usize) -> Self {
        Self::with_bucket_hint(capacity, DEFAULT_BUCKET_HINT)
    }

    /// Creates a cache from a signed capacity, rejecting negative values.
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// assert!(LfuCache::<u32, u32>::try_new(0).is_ok());
    /// assert!(LfuCache::<u32, u32>::try_new(-1).is_err());
    /// ```
    pub fn try_new(capacity: i64) -> Result<Self, ConfigError> {
        checked_capacity(capacity).map(Self::new)
    }

    /// Creates a cache and pre-sizes bucket storage for `bucket_hint`
    /// distinct frequencies.
    pub fn with_bucket_hint(capacity: usize, bucket_hint: usize) -> Self {
        debug!("lfu cache created: capacity={capacity} bucket_hint={bucket_hint}");
        let reserve = capacity.min(MAX_PREALLOC);
        let bucket_reserve = bucket_hint.min(MAX_PREALLOC);
        Self {
            entries: NodePool::with_capacity(reserve),
            buckets: NodePool::with_capacity(bucket_reserve),
            bucket_list: OrderedList::new(),
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            frequencies: FxHashMap::with_capacity_and_hasher(bucket_reserve, Default::default()),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        }
    }

    /// Returns the value for `key` and bumps its frequency.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        self.bump(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Returns the value for `key` without touching its frequency or recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Inserts or updates `key`.
    ///
    /// An existing key gets the new value and a frequency bump. A new key
    /// starts at frequency 1; if the cache is full the least frequently used
    /// entry is evicted first.
    pub fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_rejected();
            return;
        }

        if let Some(&id) = self.index.get(&key) {
            Self::entry_mut(&mut self.entries, id).value = value;
            self.bump(id);
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();
            return;
        }

        if self.index.len() == self.capacity {
            self.evict_lfu();
        }
        self.insert_new(key, value);

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();
    }

    /// Returns the access count of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let freq = self
            .index
            .get(key)
            .and_then(|&id| self.entries.get(id))
            .map(|entry| entry.freq);

        #[cfg(feature = "metrics")]
        self.metrics.record_frequency(freq.is_some());

        freq
    }

    /// Lowest frequency currently in use.
    pub fn min_frequency(&self) -> Option<u64> {
        let head = self.bucket_list.head()?;
        self.buckets.get(head).map(|bucket| bucket.freq)
    }

    /// Returns the entry that the next eviction would remove.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        let victim = self
            .bucket_list
            .head()
            .and_then(|id| self.buckets.get(id))
            .and_then(|bucket| bucket.entries.head())
            .and_then(|id| self.entries.get(id))
            .map(|entry| (&entry.key, &entry.value));

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lfu(victim.is_some());

        victim
    }

    /// Removes and returns the least frequently used entry, or `None` if the
    /// cache is empty.
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        let popped = self.pop_lowest();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu(popped.is_some());

        popped
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.index.clear();
        self.frequencies.clear();
        self.entries.clear();
        self.buckets.clear();
        self.bucket_list = OrderedList::new();
    }

    /// Iterates `(key, value)` pairs by descending frequency, most recently
    /// used first within a frequency. Does not touch frequencies.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: &self.entries,
            buckets: self.bucket_list.iter(&self.buckets),
            current: None,
            remaining: self.index.len(),
        }
    }

    /// Verifies the structural invariants of the cache.
    ///
    /// Checks the bucket list and every bucket's entry list, ascending
    /// unique bucket frequencies, the frequency and key maps, and that the
    /// size is within capacity.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.index.len(),
                self.capacity
            )));
        }

        self.bucket_list.check_invariants(&self.buckets)?;
        if self.frequencies.len() != self.bucket_list.len()
            || self.buckets.len() != self.bucket_list.len()
        {
            return Err(InvariantError::new(format!(
                "{} frequency map entries, {} live buckets, {} linked buckets",
                self.frequencies.len(),
                self.buckets.len(),
                self.bucket_list.len()
            )));
        }

        let mut total = 0usize;
        let mut last_freq = 0u64;
        for (bucket_id, bucket) in self.bucket_list.iter(&self.buckets) {
            if bucket.freq <= last_freq {
                return Err(InvariantError::new(format!(
                    "bucket {} follows bucket {last_freq}",
                    bucket.freq
                )));
            }
            last_freq = bucket.freq;

            if self.frequencies.get(&bucket.freq) != Some(&bucket_id) {
                return Err(InvariantError::new(format!(
                    "frequency map does not point at bucket {}",
                    bucket.freq
                )));
            }
            if bucket.entries.is_empty() {
                return Err(InvariantError::new(format!(
                    "bucket {} is empty",
                    bucket.freq
                )));
            }
            bucket.entries.check_invariants(&self.entries)?;

            for (entry_id, entry) in bucket.entries.iter(&self.entries) {
                if entry.freq != bucket.freq {
                    return Err(InvariantError::new(format!(
                        "entry at frequency {} sits in bucket {}",
                        entry.freq, bucket.freq
                    )));
                }
                if self.index.get(&entry.key) != Some(&entry_id) {
                    return Err(InvariantError::new(format!(
                        "key index disagrees for entry in bucket {}",
                        bucket.freq
                    )));
                }
            }
            total += bucket.entries.len();
        }

        if total != self.index.len() || total != self.entries.len() {
            return Err(InvariantError::new(format!(
                "buckets hold {total} entries, index has {}, pool has {}",
                self.index.len(),
                self.entries.len()
            )));
        }
        Ok(())
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics
            .snapshot(self.len(), self.capacity, self.bucket_list.len())
    }

    fn insert_new(&mut self, key: K, value: V) {
        let bucket_id = match self.frequencies.get(&1) {
            Some(&id) => id,
            None => {
                let id = self.new_bucket(1);
                self.bucket_list.push_front(&mut self.buckets, id);
                id
            },
        };

        let id = self.entries.insert(Entry {
            key: key.clone(),
            value,
            freq: 1,
        });
        Self::bucket_mut(&mut self.buckets, bucket_id)
            .entries
            .push_back(&mut self.entries, id);
        self.index.insert(key, id);
    }

    fn bump(&mut self, id: SlotId) {
        let freq = Self::entry_mut(&mut self.entries, id).freq;
        let bucket_id = self.bucket_for(freq);
        Self::bucket_mut(&mut self.buckets, bucket_id)
            .entries
            .pop(&mut self.entries, id);

        // u64::MAX accesses: stay in the top bucket, refresh recency only.
        let Some(next_freq) = freq.checked_add(1) else {
            Self::bucket_mut(&mut self.buckets, bucket_id)
                .entries
                .push_back(&mut self.entries, id);
            return;
        };
        Self::entry_mut(&mut self.entries, id).freq = next_freq;

        let next_id = match self.frequencies.get(&next_freq) {
            Some(&next_id) => next_id,
            None => {
                let next_id = self.new_bucket(next_freq);
                self.bucket_list
                    .push_after(&mut self.buckets, bucket_id, next_id);
                next_id
            },
        };
        Self::bucket_mut(&mut self.buckets, next_id)
            .entries
            .push_back(&mut self.entries, id);

        if Self::bucket_mut(&mut self.buckets, bucket_id)
            .entries
            .is_empty()
        {
            self.remove_bucket(bucket_id);
        }
    }

    /// Capacity-triggered eviction. The caller guarantees the cache is full,
    /// so an empty bucket list here means the structure is broken.
    fn evict_lfu(&mut self) {
        match self.pop_lowest() {
            Some(_) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            },
            None => panic!(
                "lfu eviction with no buckets (len {}, capacity {})",
                self.index.len(),
                self.capacity
            ),
        }
    }

    fn pop_lowest(&mut self) -> Option<(K, V)> {
        let bucket_id = self.bucket_list.head()?;
        let bucket = Self::bucket_mut(&mut self.buckets, bucket_id);
        let freq = bucket.freq;
        let Some(id) = bucket.entries.pop_front(&mut self.entries) else {
            panic!("lfu bucket {freq} is linked but empty");
        };
        if bucket.entries.is_empty() {
            self.remove_bucket(bucket_id);
        }

        let entry = self.entries.remove(id);
        self.index.remove(&entry.key);
        trace!("lfu evicted entry at frequency {freq}, len now {}", self.index.len());
        Some((entry.key, entry.value))
    }

    fn new_bucket(&mut self, freq: u64) -> SlotId {
        let id = self.buckets.insert(Bucket {
            freq,
            entries: OrderedList::new(),
        });
        self.frequencies.insert(freq, id);
        trace!("lfu bucket {freq} created");
        #[cfg(feature = "metrics")]
        self.metrics.record_bucket_created();
        id
    }

    fn remove_bucket(&mut self, bucket_id: SlotId) {
        self.bucket_list.pop(&mut self.buckets, bucket_id);
        let bucket = self.buckets.remove(bucket_id);
        self.frequencies.remove(&bucket.freq);
        trace!("lfu bucket {} removed", bucket.freq);
        #[cfg(feature = "metrics")]
        self.metrics.record_bucket_removed();
    }

    fn bucket_for(&self, freq: u64) -> SlotId {
        match self.frequencies.get(&freq) {
            Some(&id) => id,
            None => panic!("lfu bucket for frequency {freq} missing"),
        }
    }

    fn bucket_mut(buckets: &mut NodePool<Bucket<K, V>>, id: SlotId) -> &mut Bucket<K, V> {
        match buckets.get_mut(id) {
            Some(bucket) => bucket,
            None => panic!("lfu bucket {id:?} missing"),
        }
    }

    fn entry_mut(entries: &mut NodePool<Entry<K, V>>, id: SlotId) -> &mut Entry<K, V> {
        match entries.get_mut(id) {
            Some(entry) => entry,
            None => panic!("lfu entry {id:?} missing"),
        }
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// A cache with [`DEFAULT_CAPACITY`] entries.
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .field("buckets", &self.bucket_list.len())
            .finish()
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn put(&mut self, key: K, value: V) {
        LfuCache::put(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LfuCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LfuCache::clear(self);
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        LfuCache::pop_lfu(self)
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        LfuCache::peek_lfu(self)
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        LfuCache::frequency(self, key)
    }
}

impl<'a, K, V> IntoIterator for &'a LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cache entries by descending frequency.
///
/// Created by [`LfuCache::iter`].
pub struct Iter<'a, K, V> {
    entries: &'a NodePool<Entry<K, V>>,
    buckets: node_list::Iter<'a, Bucket<K, V>>,
    current: Option<node_list::Iter<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, entry)) = self.current.as_mut().and_then(|it| it.next_back()) {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            let (_, bucket) = self.buckets.next_back()?;
            self.current = Some(bucket.entries.iter(self.entries));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
