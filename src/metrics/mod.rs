//! Metrics and observability module
//!
//! Key metrics exposed:
//! - Request latency (histogram)
//! - Line lengths (histogram)
//! - Processed line count (counter)
//! - Last line length (gauge)

pub mod exporter;
pub mod recorder;

pub use exporter::{metrics_route, MetricsError, MetricsExporter, DEFAULT_BUCKETS};
pub use recorder::{LineMetrics, METRIC_NAMES};
