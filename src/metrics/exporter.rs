use std::io::{self, Write};

use crate::metrics::snapshot::LfuMetricsSnapshot;

/// Prometheus text exporter for LFU metrics snapshots.
///
/// Writes the text exposition format so the output can be scraped directly
/// or forwarded to a collector. Every metric name gets `prefix_` prepended
/// unless the prefix is empty.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write> {
    prefix: String,
    writer: W,
}

impl<W: Write> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn export(&mut self, snapshot: &LfuMetricsSnapshot) -> io::Result<()> {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("put_calls_total", snapshot.put_calls),
            ("put_updates_total", snapshot.put_updates),
            ("put_new_total", snapshot.put_new),
            ("put_rejected_total", snapshot.put_rejected),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("pop_lfu_calls_total", snapshot.pop_lfu_calls),
            ("pop_lfu_found_total", snapshot.pop_lfu_found),
            ("peek_lfu_calls_total", snapshot.peek_lfu_calls),
            ("peek_lfu_found_total", snapshot.peek_lfu_found),
            ("frequency_calls_total", snapshot.frequency_calls),
            ("frequency_found_total", snapshot.frequency_found),
            ("buckets_created_total", snapshot.buckets_created),
            ("buckets_removed_total", snapshot.buckets_removed),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", suffix, value)?;
        }

        self.write_metric("gauge", "cache_len", snapshot.cache_len as u64)?;
        self.write_metric("gauge", "capacity", snapshot.capacity as u64)?;
        self.write_metric("gauge", "bucket_count", snapshot.bucket_count as u64)?;
        self.writer.flush()
    }

    fn write_metric(&mut self, kind: &str, suffix: &str, value: u64) -> io::Result<()> {
        let name = self.metric_name(suffix);
        writeln!(self.writer, "# TYPE {name} {kind}")?;
        writeln!(self.writer, "{name} {value}")
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_prefixed_counters_and_gauges() {
        let snapshot = LfuMetricsSnapshot {
            get_calls: 5,
            get_hits: 4,
            cache_len: 3,
            capacity: 8,
            ..Default::default()
        };
        let mut exporter = PrometheusTextExporter::new("lfu", Vec::new());
        exporter.export(&snapshot).unwrap();
        let text = String::from_utf8(exporter.into_inner()).unwrap();

        assert!(text.contains("# TYPE lfu_get_calls_total counter\nlfu_get_calls_total 5\n"));
        assert!(text.contains("lfu_get_hits_total 4\n"));
        assert!(text.contains("# TYPE lfu_cache_len gauge\nlfu_cache_len 3\n"));
        assert!(text.contains("lfu_capacity 8\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let mut exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&LfuMetricsSnapshot::default()).unwrap();
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\nget_calls_total 0\n"));
    }
}
