//! Server configuration

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Default listen port
pub const DEFAULT_PORT: u16 = 9000;

/// Upper bound of the simulated per-request work
pub const DEFAULT_MAX_WORK_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP server
    pub listen_addr: SocketAddr,

    /// `/process` sleeps a random whole number of milliseconds below this
    /// value. Zero disables the sleep.
    pub max_work_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            max_work_delay: DEFAULT_MAX_WORK_DELAY,
        }
    }
}

impl ServerConfig {
    /// Create a new config with custom address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }

    /// Override the simulated work delay
    pub fn with_max_work_delay(mut self, delay: Duration) -> Self {
        self.max_work_delay = delay;
        self
    }
}
