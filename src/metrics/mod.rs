//! Operation counters for the LFU cache (feature `metrics`).
//!
//! ## Key Components
//!
//! - [`LfuMetrics`]: counters updated in place by the cache
//! - [`LfuMetricsSnapshot`]: plain `Copy` view returned by
//!   `LfuCache::metrics_snapshot`
//! - [`PrometheusTextExporter`]: writes a snapshot in Prometheus text format

pub mod cell;
pub mod exporter;
pub mod lfu_metrics;
pub mod snapshot;

pub use exporter::PrometheusTextExporter;
pub use lfu_metrics::LfuMetrics;
pub use snapshot::LfuMetricsSnapshot;
