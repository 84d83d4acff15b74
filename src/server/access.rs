//! Routes for `access-probe`
//!
//! - `/startupz` - Startup probe: one cluster API call per request
//! - `/healthz` - Health check that never fails

use crate::probe::{check_dependency, DependencyProbe, ProbeOutcome};
use axum::{extract::State, http::StatusCode, routing::get, Router};
use std::sync::Arc;
use tracing::info;

/// Startup probe handler
///
/// Awaits the dependency call for as long as it takes. A denied permission
/// is reported as 500 "forbidden", not 403, matching the probe drill.
async fn startupz(State(probe): State<Arc<dyn DependencyProbe>>) -> (StatusCode, &'static str) {
    info!("Startup probe hit, checking permissions");

    match check_dependency(probe.as_ref()).await {
        ProbeOutcome::Success => {
            info!("Access OK");
            (StatusCode::OK, "OK\n")
        }
        ProbeOutcome::Failure(reason) => {
            info!(reason = %reason, "Access denied");
            (StatusCode::INTERNAL_SERVER_ERROR, "forbidden\n")
        }
    }
}

/// Health handler with no check behind it
async fn healthz() -> &'static str {
    "always ready\n"
}

/// Build the `access-probe` router around a dependency probe
///
/// Both routes answer GET (and HEAD) only; other methods get axum's 405.
pub fn access_router(probe: Arc<dyn DependencyProbe>) -> Router {
    Router::new()
        .route("/startupz", get(startupz))
        .route("/healthz", get(healthz))
        .with_state(probe)
}
