//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics
//! - Build the route trie
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener starts last (traffic only when the trie is ready)

use std::error::Error;
use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::watcher::ConfigWatcher;
use crate::config::load_config;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_handler;
use crate::observability::{logging, metrics};
use crate::routing::Router;

/// Start the router service from the file at `config_path`.
///
/// With `watch` set, edits to the file are rebuilt and swapped in live.
pub async fn run(config_path: &Path, watch: bool) -> Result<(), Box<dyn Error>> {
    let config = load_config(config_path)?;
    logging::init_logging(&config.observability)?;

    tracing::info!(
        path = %config_path.display(),
        bind_address = %config.server.bind_address,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let router = match Router::from_config(&config.routes) {
        Ok(router) => router,
        Err(e) => {
            metrics::record_build(false, 0);
            tracing::error!(error = %e, "Route table failed to build");
            return Err(e.into());
        }
    };
    metrics::record_build(true, router.len());

    let (_watcher, updates) = if watch {
        let (watcher, updates) = ConfigWatcher::new(config_path);
        (Some(watcher.run()?), updates)
    } else {
        let (_, updates) = mpsc::unbounded_channel();
        (None, updates)
    };

    let listener = TcpListener::bind(&config.server.bind_address).await?;

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    spawn_signal_handler(shutdown);

    HttpServer::new(&config.server, router)
        .run(listener, updates, stop)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
