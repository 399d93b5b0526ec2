//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum app with a single fallback dispatcher
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve every request against the active route trie
//! - Swap in recompiled tries when the route table changes
//!
//! # Design Decisions
//! - The trie sits behind `ArcSwap`: lookups never block, reloads are atomic
//! - Only tries that compiled arrive here; the watcher drops the rest
//! - Every method and path goes through the trie; Axum's own router is unused

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router as AxumRouter,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{MakeRequestUuidV4, RequestIdExt};
use crate::http::response::{MatchBody, NotFoundBody};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::routing::{HttpMethod, RouteTarget, Router};

/// Active route trie shared between the dispatcher and the reloader.
pub type SharedRoutes = Arc<ArcSwap<Router<RouteTarget>>>;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: SharedRoutes,
}

/// HTTP front end for the route trie.
pub struct HttpServer {
    app: AxumRouter,
    routes: SharedRoutes,
}

impl HttpServer {
    /// Create a server answering from `router`.
    pub fn new(config: &ServerConfig, router: Router<RouteTarget>) -> Self {
        let routes: SharedRoutes = Arc::new(ArcSwap::from_pointee(router));
        let state = AppState {
            routes: routes.clone(),
        };
        let app = Self::build_app(config, state);
        Self { app, routes }
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, state: AppState) -> AxumRouter {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        AxumRouter::new().fallback(dispatch).with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(timeout)),
        )
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Routers arriving on `updates` replace the active one.
    pub async fn run(
        self,
        listener: TcpListener,
        mut updates: mpsc::UnboundedReceiver<Router<RouteTarget>>,
        shutdown: ShutdownSignal,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes.load().len(),
            "HTTP server starting"
        );

        let routes = self.routes.clone();
        tokio::spawn(async move {
            while let Some(router) = updates.recv().await {
                let count = router.len();
                routes.store(Arc::new(router));
                tracing::info!(routes = count, "Route table swapped in");
            }
        });

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the request against the trie and describe the result.
async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let started = Instant::now();
    let request_id = request.headers().request_id();
    let path = request.uri().path();
    let routes = state.routes.load();

    let found = HttpMethod::try_from(request.method())
        .ok()
        .and_then(|method| routes.lookup(method, path));
    metrics::record_lookup(found.is_some(), started);

    match found {
        Some(found) => {
            tracing::debug!(
                request_id = %request_id,
                method = %request.method(),
                path = %path,
                route = %found.handler.name,
                "Route matched"
            );
            (StatusCode::OK, Json(MatchBody::from(found))).into_response()
        }
        None => {
            tracing::debug!(
                request_id = %request_id,
                method = %request.method(),
                path = %path,
                "No route matched"
            );
            let body = NotFoundBody::new(request.method().as_str(), path);
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;

    fn router(routes: &[(&str, &str)]) -> Router<RouteTarget> {
        let routes: Vec<RouteConfig> = routes
            .iter()
            .map(|(name, path)| RouteConfig {
                name: name.to_string(),
                method: HttpMethod::Get,
                path: path.to_string(),
            })
            .collect();
        Router::from_config(&routes).unwrap()
    }

    #[tokio::test]
    async fn test_stored_trie_is_served() {
        let server = HttpServer::new(&ServerConfig::default(), router(&[("a", "/a")]));
        assert!(server.routes.load().lookup(HttpMethod::Get, "/a").is_some());

        // the dispatcher state shares the same handle
        server.routes.store(Arc::new(router(&[("b", "/b/:id")])));
        let dispatched = AppState {
            routes: server.routes.clone(),
        };
        assert!(dispatched.routes.load().lookup(HttpMethod::Get, "/b/1").is_some());
        assert!(dispatched.routes.load().lookup(HttpMethod::Get, "/a").is_none());
    }
}
