//! Server lifecycle: build state, bind, serve until killed.

use crate::api::{create_api_server, AppState};
use crate::config::ServerConfig;
use crate::metrics::MetricsError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

/// How often histogram samples are drained into their buckets
const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind the HTTP listener
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    let app = create_api_server(state);
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}

/// Initialize metrics, bind and serve. Only returns on failure.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::new(&config)?;
    let _upkeep = state.exporter().spawn_upkeep(UPKEEP_INTERVAL);

    let listener = bind(config.listen_addr).await?;
    tracing::info!(listen = %config.listen_addr, "repl-server listening");

    serve(listener, state).await
}
