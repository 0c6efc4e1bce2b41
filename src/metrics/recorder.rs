//! Instruments recorded by the `/process` endpoint
//!
//! The four instruments are described and registered once against an
//! explicit recorder; the returned handles are cheap to clone and safe to
//! record from any task.

use metrics::{Counter, Gauge, Histogram, Key, KeyName, Label, Level, Metadata, Recorder, Unit};
use std::time::Duration;

pub const LATENCY: &str = "repl_latency_seconds";
pub const LINE_LENGTHS: &str = "repl_line_lengths";
pub const LINE_COUNT: &str = "repl_line_count";
pub const LAST_LINE_LENGTH: &str = "repl_last_line_length";

/// Labels attached to every series. `/process` only answers GET with 200.
pub static LABELS: [Label; 2] = [
    Label::from_static_parts("method", "GET"),
    Label::from_static_parts("status", "OK"),
];

/// Names of every registered instrument, in registration order.
pub const METRIC_NAMES: [&str; 4] = [LATENCY, LINE_LENGTHS, LINE_COUNT, LAST_LINE_LENGTH];

#[derive(Clone)]
pub struct LineMetrics {
    latency: Histogram,
    line_lengths: Histogram,
    line_count: Counter,
    last_line_length: Gauge,
}

impl LineMetrics {
    pub(crate) fn register<R: Recorder>(recorder: &R) -> Self {
        let metadata = Metadata::new(module_path!(), Level::INFO, Some(module_path!()));

        // prometheus type: histogram
        recorder.describe_histogram(
            KeyName::from_const_str(LATENCY),
            Some(Unit::Seconds),
            "The distribution of the latencies".into(),
        );
        // prometheus type: histogram
        recorder.describe_histogram(
            KeyName::from_const_str(LINE_LENGTHS),
            Some(Unit::Bytes),
            "Groups the lengths of keys in buckets".into(),
        );
        // prometheus type: counter
        recorder.describe_counter(
            KeyName::from_const_str(LINE_COUNT),
            None,
            "Count of lines".into(),
        );
        // prometheus type: gauge
        recorder.describe_gauge(
            KeyName::from_const_str(LAST_LINE_LENGTH),
            Some(Unit::Bytes),
            "Last line length".into(),
        );

        let key = |name: &'static str| Key::from_static_parts(name, &LABELS);

        Self {
            latency: recorder.register_histogram(&key(LATENCY), &metadata),
            line_lengths: recorder.register_histogram(&key(LINE_LENGTHS), &metadata),
            line_count: recorder.register_counter(&key(LINE_COUNT), &metadata),
            last_line_length: recorder.register_gauge(&key(LAST_LINE_LENGTH), &metadata),
        }
    }

    /// Record one processed line and how long it took to serve.
    pub fn record_line(&self, line: &str, elapsed: Duration) {
        let length = line.len() as f64;

        self.latency.record(elapsed.as_secs_f64());
        self.line_lengths.record(length);
        self.line_count.increment(1);
        self.last_line_length.set(length);
    }
}

impl std::fmt::Debug for LineMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineMetrics")
            .field("instruments", &METRIC_NAMES)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsExporter;

    #[test]
    fn test_record_line_updates_all_instruments() {
        let exporter = MetricsExporter::new().unwrap();
        let metrics = exporter.register_line_metrics();

        metrics.record_line("hello", Duration::from_millis(3));
        metrics.record_line("hi", Duration::from_millis(7));

        let rendered = exporter.render();
        assert!(rendered.contains("repl_line_count{method=\"GET\",status=\"OK\"} 2"));
        assert!(rendered.contains("repl_last_line_length{method=\"GET\",status=\"OK\"} 2"));
        assert!(rendered.contains("repl_line_lengths_count{method=\"GET\",status=\"OK\"} 2"));
        assert!(rendered.contains("repl_line_lengths_sum{method=\"GET\",status=\"OK\"} 7"));
        assert!(rendered.contains("repl_latency_seconds_count{method=\"GET\",status=\"OK\"} 2"));
    }

    #[test]
    fn test_descriptions_rendered() {
        let exporter = MetricsExporter::new().unwrap();
        let metrics = exporter.register_line_metrics();
        metrics.record_line("", Duration::ZERO);

        let rendered = exporter.render();
        assert!(rendered.contains("# HELP repl_line_count Count of lines"));
        assert!(rendered.contains("# HELP repl_last_line_length Last line length"));
        assert!(rendered.contains("# TYPE repl_latency_seconds histogram"));
        assert!(rendered.contains("# TYPE repl_last_line_length gauge"));
    }

    #[test]
    fn test_line_length_counts_bytes() {
        let exporter = MetricsExporter::new().unwrap();
        let metrics = exporter.register_line_metrics();

        metrics.record_line("héllo", Duration::ZERO);
        assert!(exporter.render()
            .contains("repl_last_line_length{method=\"GET\",status=\"OK\"} 6"));
    }
}
