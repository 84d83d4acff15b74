//! HTTP servers for the probe drills
//!
//! Each binary builds one router and hands it to `serve`:
//! - `notify_router` - liveness/readiness with a delayed readiness gate
//! - `access_router` - startup probe backed by a cluster permission check
//! - `frontend_router` - health check that depends on a backend
//!
//! Also provides graceful shutdown handling for SIGTERM/SIGINT.

mod access;
mod frontend;
mod notify;
pub mod shutdown;

pub use access::access_router;
pub use frontend::{frontend_router, FrontendState};
pub use notify::{notify_router, notify_routes, NotifyState};
pub use shutdown::{
    shutdown_pair, trigger_on_signal, wait_for_signal, ShutdownListener, ShutdownTrigger, Signal,
};

use axum::Router;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("Server crashed: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind all interfaces on `port`
pub async fn bind(port: u16) -> Result<TcpListener, ServerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { port, source })
}

/// Serve `app` on `listener` until `shutdown` fires
///
/// In-flight requests are drained before this returns.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: ShutdownListener,
) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        // Log after bind - the server is actually listening
        info!(addr = %addr, "Listening");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.triggered())
        .await
        .map_err(ServerError::Serve)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod testing;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "notify_test.rs"]
mod notify_tests;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "access_test.rs"]
mod access_tests;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "frontend_test.rs"]
mod frontend_tests;

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
