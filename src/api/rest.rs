use crate::api::types::ProcessQuery;
use crate::config::ServerConfig;
use crate::metrics::{metrics_route, LineMetrics, MetricsError, MetricsExporter};
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    routing::get,
    Router,
};
use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Everything a request handler needs, built once at startup.
#[derive(Clone, Debug)]
pub struct AppState {
    exporter: Arc<MetricsExporter>,
    metrics: LineMetrics,
    max_work_delay: Duration,
}

impl AppState {
    /// Set up the exporter and register the instruments.
    pub fn new(config: &ServerConfig) -> Result<Self, MetricsError> {
        let exporter = MetricsExporter::new()?;
        Ok(Self::with_exporter(exporter, config.max_work_delay))
    }

    pub fn with_exporter(exporter: MetricsExporter, max_work_delay: Duration) -> Self {
        let metrics = exporter.register_line_metrics();
        Self {
            exporter: Arc::new(exporter),
            metrics,
            max_work_delay,
        }
    }

    pub fn exporter(&self) -> &MetricsExporter {
        &self.exporter
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/process", get(process_line))
            .route("/metrics", metrics_route(self.exporter.handle()))
            .with_state(self.clone())
    }
}

// No error path: every request is answered with 200.
async fn process_line(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> (StatusCode, String) {
    let started = Instant::now();
    let line = ProcessQuery::parse(raw.as_deref()).line;

    simulate_work(state.max_work_delay).await;

    let body = format!("{}\n", line.to_uppercase());

    let elapsed = started.elapsed();
    state.metrics.record_line(&line, elapsed);
    tracing::debug!(length = line.len(), ?elapsed, "processed line");

    (StatusCode::OK, body)
}

async fn simulate_work(max: Duration) {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return;
    }
    let delay = Duration::from_millis(rand::thread_rng().gen_range(0..max_ms));
    tokio::time::sleep(delay).await;
}
