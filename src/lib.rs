//! Upper-casing echo service instrumented with Prometheus metrics.
//!
//! `GET /process?line=...` answers with the upper-cased line and records four
//! measurements; `GET /metrics` serves the scrape snapshot.

pub mod api;
pub mod config;
pub mod metrics;
pub mod server;
