//! HTTP front end for the route trie.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign request ID)
//!     → [routing trie resolves method + path]
//!     → response.rs (match or not-found JSON)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use response::{MatchBody, NotFoundBody};
pub use server::{AppState, HttpServer, SharedRoutes};
