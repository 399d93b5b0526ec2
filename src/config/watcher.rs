//! Route table watcher for hot reload.
//!
//! # Responsibilities
//! - Watch the route table file with `notify`
//! - Reload, validate and compile the table on every change
//! - Publish compiled routers to the server
//!
//! # Design Decisions
//! - Tables are compiled here, so a table with conflicting or malformed
//!   patterns never reaches the server
//! - Events arrive on notify's thread; compiled routers cross to the runtime
//!   over an unbounded channel

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_router;
use crate::observability::metrics;
use crate::routing::{RouteTarget, Router};

/// Watches a route table file and publishes a fresh router per valid edit.
pub struct ConfigWatcher {
    reloader: Reloader,
}

#[derive(Clone)]
struct Reloader {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<Router<RouteTarget>>,
}

impl Reloader {
    /// Recompile the table; true when a router was published.
    fn reload(&self) -> bool {
        match load_router(&self.path) {
            Ok(router) => {
                let routes = router.len();
                metrics::record_build(true, routes);
                tracing::info!(path = %self.path.display(), routes, "Route table recompiled");
                self.update_tx.send(router).is_ok()
            }
            Err(e) => {
                metrics::record_build(false, 0);
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Route table reload failed, keeping current routes"
                );
                false
            }
        }
    }
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for compiled routers.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<Router<RouteTarget>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let reloader = Reloader {
            path: path.to_path_buf(),
            update_tx,
        };
        (Self { reloader }, update_rx)
    }

    /// Start watching in notify's background thread.
    ///
    /// The returned watcher must be kept alive for as long as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.reloader.path.clone();
        let reloader = self.reloader;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) => {
                    tracing::debug!(kind = ?event.kind, "Route table changed");
                    reloader.reload();
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Route table watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %path.display(), "Route table watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::HttpMethod;
    use std::fs;

    fn table_file(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("radix-router-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_valid_table_is_published() {
        let path = table_file(
            r#"
            [[routes]]
            name = "user"
            method = "GET"
            path = "/users/:id"
            "#,
        );
        let (watcher, mut rx) = ConfigWatcher::new(&path);

        assert!(watcher.reloader.reload());
        let router = rx.try_recv().unwrap();
        let found = router.lookup(HttpMethod::Get, "/users/9").unwrap();
        assert_eq!(found.handler.name, "user");

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_conflicting_table_is_not_published() {
        let path = table_file(
            r#"
            [[routes]]
            name = "wild"
            path = "/aaa/*"

            [[routes]]
            name = "param"
            path = "/aaa/:pp"
            "#,
        );
        let (watcher, mut rx) = ConfigWatcher::new(&path);

        assert!(!watcher.reloader.reload());
        assert!(rx.try_recv().is_err());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_unreadable_table_is_not_published() {
        let (watcher, mut rx) = ConfigWatcher::new(Path::new("/definitely/not/here.toml"));
        assert!(!watcher.reloader.reload());
        assert!(rx.try_recv().is_err());
    }
}
