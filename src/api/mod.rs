mod rest;
mod types;

pub use rest::AppState;
pub use types::*;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the HTTP server: `/process` and `/metrics` with request tracing
pub fn create_api_server(state: AppState) -> Router {
    state.router().layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    #[test]
    fn test_api_server_creation() {
        let state = AppState::new(&ServerConfig::default()).unwrap();
        let _app = create_api_server(state);
    }
}
