//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use radix_router::config::{RouteConfig, ServerConfig};
use radix_router::http::HttpServer;
use radix_router::lifecycle::Shutdown;
use radix_router::routing::{HttpMethod, RouteTarget, Router};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A route entry as it would appear in the route table.
pub fn route(name: &str, method: HttpMethod, path: &str) -> RouteConfig {
    RouteConfig {
        name: name.into(),
        method,
        path: path.into(),
    }
}

/// A running server bound to an ephemeral port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub updates: mpsc::UnboundedSender<Router<RouteTarget>>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Build the trie for `routes` and serve it on 127.0.0.1.
pub async fn start_server(routes: Vec<RouteConfig>) -> TestServer {
    let router = Router::from_config(&routes).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    let (updates, rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(HttpServer::new(&ServerConfig::default(), router).run(listener, rx, stop));
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        updates,
        handle,
    }
}

/// HTTP client that talks to the test server directly.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
