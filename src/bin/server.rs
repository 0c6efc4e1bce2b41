use repl_metrics::config::ServerConfig;
use repl_metrics::server;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = ServerConfig::default();

    if let Err(e) = server::run(config).await {
        let e = anyhow::Error::new(e).context("repl-server terminated");
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
