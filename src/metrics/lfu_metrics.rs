use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::LfuMetricsSnapshot;

/// Operation counters kept by [`LfuCache`](crate::policy::lfu::LfuCache)
/// when the `metrics` feature is enabled.
#[derive(Debug, Default)]
pub struct LfuMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub put_calls: u64,
    pub put_updates: u64,
    pub put_new: u64,
    pub put_rejected: u64,
    pub evicted_entries: u64,
    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_lfu_calls: MetricsCell,
    pub peek_lfu_found: MetricsCell,
    pub frequency_calls: MetricsCell,
    pub frequency_found: MetricsCell,
    pub buckets_created: u64,
    pub buckets_removed: u64,
}

impl LfuMetrics {
    pub fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    pub fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    pub fn record_put_update(&mut self) {
        self.put_calls += 1;
        self.put_updates += 1;
    }

    pub fn record_put_new(&mut self) {
        self.put_calls += 1;
        self.put_new += 1;
    }

    /// A put on a zero-capacity cache.
    pub fn record_put_rejected(&mut self) {
        self.put_calls += 1;
        self.put_rejected += 1;
    }

    pub fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    pub fn record_pop_lfu(&mut self, found: bool) {
        self.pop_lfu_calls += 1;
        if found {
            self.pop_lfu_found += 1;
        }
    }

    pub fn record_peek_lfu(&self, found: bool) {
        self.peek_lfu_calls.incr();
        if found {
            self.peek_lfu_found.incr();
        }
    }

    pub fn record_frequency(&self, found: bool) {
        self.frequency_calls.incr();
        if found {
            self.frequency_found.incr();
        }
    }

    pub fn record_bucket_created(&mut self) {
        self.buckets_created += 1;
    }

    pub fn record_bucket_removed(&mut self) {
        self.buckets_removed += 1;
    }

    /// Copies the counters and attaches the given gauges.
    pub fn snapshot(&self, len: usize, capacity: usize, buckets: usize) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            put_calls: self.put_calls,
            put_updates: self.put_updates,
            put_new: self.put_new,
            put_rejected: self.put_rejected,
            evicted_entries: self.evicted_entries,
            pop_lfu_calls: self.pop_lfu_calls,
            pop_lfu_found: self.pop_lfu_found,
            peek_lfu_calls: self.peek_lfu_calls.get(),
            peek_lfu_found: self.peek_lfu_found.get(),
            frequency_calls: self.frequency_calls.get(),
            frequency_found: self.frequency_found.get(),
            buckets_created: self.buckets_created,
            buckets_removed: self.buckets_removed,
            cache_len: len,
            capacity,
            bucket_count: buckets,
        }
    }
}
