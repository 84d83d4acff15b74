//! Routes for `frontend`
//!
//! `/health` reaches through to the backend, so a backend outage takes the
//! frontend out of rotation too. Every other path greets the caller.

use crate::probe::{check_dependency, DependencyProbe, ProbeOutcome};
use axum::{extract::State, http::StatusCode, routing::any, Router};
use std::sync::Arc;

#[derive(Clone)]
pub struct FrontendState {
    backend: Arc<dyn DependencyProbe>,
    hostname: Arc<str>,
}

impl FrontendState {
    pub fn new(backend: Arc<dyn DependencyProbe>, hostname: &str) -> Self {
        Self {
            backend,
            hostname: Arc::from(hostname),
        }
    }
}

async fn health(State(state): State<FrontendState>) -> (StatusCode, &'static str) {
    match check_dependency(state.backend.as_ref()).await {
        ProbeOutcome::Success => (StatusCode::OK, "OK"),
        ProbeOutcome::Failure(_) => (StatusCode::INTERNAL_SERVER_ERROR, "KO"),
    }
}

async fn hello(State(state): State<FrontendState>) -> String {
    format!("Hello from frontend on {}", state.hostname)
}

/// Build the `frontend` router
pub fn frontend_router(state: FrontendState) -> Router {
    Router::new()
        .route("/health", any(health))
        .fallback(hello)
        .with_state(state)
}
