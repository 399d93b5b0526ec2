//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_lookups_total` (counter): lookups by outcome (`matched`, `not_found`)
//! - `router_lookup_duration_seconds` (histogram): trie walk latency
//! - `router_builds_total` (counter): trie builds by result (`ok`, `error`)
//! - `router_routes` (gauge): routes in the active trie
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Route names are not used as labels to keep cardinality bounded

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one lookup that started at `started`.
pub fn record_lookup(matched: bool, started: Instant) {
    let outcome = if matched { "matched" } else { "not_found" };
    metrics::counter!("router_lookups_total", "outcome" => outcome).increment(1);
    metrics::histogram!("router_lookup_duration_seconds").record(started.elapsed().as_secs_f64());
}

/// Record a build attempt; `routes` is the size of the trie now serving.
pub fn record_build(ok: bool, routes: usize) {
    let result = if ok { "ok" } else { "error" };
    metrics::counter!("router_builds_total", "result" => result).increment(1);
    if ok {
        metrics::gauge!("router_routes").set(routes as f64);
    }
}
