//! Prometheus metrics exporter
//!
//! Owns the recorder the instruments are registered on and serves its
//! snapshot over HTTP for Prometheus scraping. Nothing here is installed as
//! the process-global recorder; callers hold the exporter explicitly.

use crate::metrics::recorder::LineMetrics;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use std::time::Duration;

/// Default histogram boundaries of the Prometheus client libraries.
pub const DEFAULT_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Prometheus text exposition content type
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

pub struct MetricsExporter {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl std::fmt::Debug for MetricsExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsExporter").finish_non_exhaustive()
    }
}

impl MetricsExporter {
    /// Build an exporter whose histograms use [`DEFAULT_BUCKETS`].
    pub fn new() -> Result<Self, MetricsError> {
        Self::with_buckets(&DEFAULT_BUCKETS)
    }

    /// Build an exporter with explicit histogram boundaries.
    pub fn with_buckets(buckets: &[f64]) -> Result<Self, MetricsError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets(buckets)
            .map_err(|e| MetricsError::SetupFailed(e.to_string()))?
            .build_recorder();
        let handle = recorder.handle();

        Ok(Self { recorder, handle })
    }

    /// Describe and register the request instruments on this exporter.
    ///
    /// Meant to be called once at startup; every call hands out handles to
    /// the same underlying series.
    pub fn register_line_metrics(&self) -> LineMetrics {
        LineMetrics::register(&self.recorder)
    }

    /// Handle used to render the current snapshot
    pub fn handle(&self) -> PrometheusHandle {
        self.handle.clone()
    }

    /// Render metrics in the text exposition format
    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Periodically drain histogram samples so they don't pile up between
    /// scrapes. The task runs until the runtime shuts down.
    pub fn spawn_upkeep(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let handle = self.handle.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                handle.run_upkeep();
            }
        })
    }
}

/// Errors that can occur during metrics setup
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Failed to setup metrics: {0}")]
    SetupFailed(String),
}

/// Create an axum route for serving metrics
pub fn metrics_route<S>(handle: PrometheusHandle) -> axum::routing::MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    axum::routing::get(move || {
        let handle = handle.clone();
        async move {
            (
                [(axum::http::header::CONTENT_TYPE, CONTENT_TYPE_TEXT)],
                handle.render(),
            )
        }
    })
}
