//! Routes for `notify-service`
//!
//! - `{prefix}/live` - Liveness: always 200 while the process serves HTTP
//! - `{prefix}/ready` - Readiness: 503 until the gate opens (gated mode)
//! - `/notify` - POST-only stub that acknowledges and discards the body
//! - `/` - Welcome message; every other path answers 500 "Not found"

use crate::config::HealthPrefix;
use crate::readiness::{ReadinessGate, ReadinessMode};
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    routing::{any, get},
    Router,
};
use tracing::{debug, info};

/// Router state: a read-only view of readiness
#[derive(Clone)]
pub struct NotifyState {
    gate: ReadinessGate,
    mode: ReadinessMode,
}

impl NotifyState {
    pub fn new(gate: ReadinessGate, mode: ReadinessMode) -> Self {
        Self { gate, mode }
    }
}

/// Liveness probe handler
///
/// Independent of readiness: answering at all means the process is alive.
async fn live() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK\n")
}

/// Readiness probe handler
async fn ready(State(state): State<NotifyState>) -> (StatusCode, &'static str) {
    let ready = match state.mode {
        ReadinessMode::AlwaysReady => true,
        ReadinessMode::Gated { .. } => state.gate.is_ready(),
    };

    if ready {
        (StatusCode::OK, "Ready\n")
    } else {
        debug!("Readiness probe hit before initialization finished");
        (StatusCode::SERVICE_UNAVAILABLE, "Not ready yet\n")
    }
}

/// Notification stub
async fn notify(method: Method) -> (StatusCode, &'static str) {
    if method != Method::POST {
        return (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed\n");
    }
    info!("Received notification request");
    info!("Notification processed successfully");
    (StatusCode::ACCEPTED, "Notification accepted\n")
}

async fn welcome() -> &'static str {
    "Welcome to notify-service!\n"
}

/// Catch-all for unmatched paths
///
/// Answers 500 rather than 404; probe drills depend on this status.
async fn not_found(uri: Uri) -> (StatusCode, &'static str) {
    debug!(path = %uri.path(), "No route for path");
    (StatusCode::INTERNAL_SERVER_ERROR, "Not found\n")
}

/// Route list, for startup logging
pub fn notify_routes(prefix: HealthPrefix) -> Vec<(&'static str, String)> {
    vec![
        ("GET", format!("{} → Liveness probe", prefix.live_path())),
        ("GET", format!("{} → Readiness probe", prefix.ready_path())),
        ("GET", "/ → Welcome message".to_string()),
        ("POST", "/notify → Send a notification".to_string()),
    ]
}

/// Build the `notify-service` router
///
/// Probe routes answer GET (and HEAD) only; other methods get axum's 405.
pub fn notify_router(prefix: HealthPrefix, state: NotifyState) -> Router {
    Router::new()
        .route(prefix.live_path(), get(live))
        .route(prefix.ready_path(), get(ready))
        .route("/notify", any(notify))
        .route("/", any(welcome))
        .fallback(not_found)
        .with_state(state)
}
