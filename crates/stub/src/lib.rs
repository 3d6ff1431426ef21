//! In-memory stand-in for the food-truck schedule service.
//!
//! Serves the same HTTP contract as the real service, including its
//! inconsistent "not found" encodings, so clients can be exercised end to
//! end. Used by the integration tests of the other workspace crates and as
//! a local development server.

use std::net::SocketAddr;

use axum::Router;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

pub mod routes;
pub mod state;

pub use state::{Behavior, StubState};

/// Build the service router over `state`.
pub fn app(state: StubState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::schedule::router())
        .merge(routes::userdata::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `state` on an ephemeral localhost port.
///
/// Returns the bound address and the server task.
pub async fn spawn(state: StubState) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = app(state);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Stub server stopped");
        }
    });
    Ok((addr, handle))
}
