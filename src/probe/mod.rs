//! Dependency probes
//!
//! A probe issues one bounded call against an external dependency and
//! reports only whether that call errored:
//! - `PodListProbe` lists at most one pod through the cluster API
//! - `HttpProbe` fetches a backend URL
//! - `MockProbe` returns a configured result (tests)
//!
//! Errors are never retried, cached, or classified. Every failure cause
//! collapses into `ProbeOutcome::Failure`.

pub mod cluster;
pub mod http;

pub use cluster::PodListProbe;
pub use http::HttpProbe;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Failed to load in-cluster config: {0}")]
    InClusterConfig(#[from] kube::config::InClusterError),

    #[error("Backend unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// Raised by in-process test doubles
    #[cfg(test)]
    #[error("Probe failed: {0}")]
    Other(String),
}

/// Result of a single dependency check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    Failure(String),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success)
    }
}

/// A single call against an external dependency
#[async_trait]
pub trait DependencyProbe: Send + Sync {
    /// Dependency name used in log fields
    fn name(&self) -> &str;

    /// Issue the underlying call once
    async fn query(&self) -> Result<(), ProbeError>;
}

/// Run `probe` once and collapse its result into a `ProbeOutcome`
///
/// Waits for as long as the underlying call takes; no timeout is added here.
pub async fn check_dependency(probe: &dyn DependencyProbe) -> ProbeOutcome {
    match probe.query().await {
        Ok(()) => {
            info!(dependency = probe.name(), "Dependency check passed");
            ProbeOutcome::Success
        }
        Err(e) => {
            warn!(dependency = probe.name(), error = %e, "Dependency check failed");
            ProbeOutcome::Failure(e.to_string())
        }
    }
}

/// Probe returning a preconfigured result
///
/// Thread-safe via `Mutex`; counts calls so tests can assert that every
/// request triggers exactly one query.
#[cfg(test)]
pub struct MockProbe {
    result: std::sync::Mutex<Result<(), String>>,
    call_count: std::sync::atomic::AtomicU32,
}

#[cfg(test)]
impl MockProbe {
    pub fn succeeding() -> Self {
        Self {
            result: std::sync::Mutex::new(Ok(())),
            call_count: std::sync::atomic::AtomicU32::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: std::sync::Mutex::new(Err(message.to_string())),
            call_count: std::sync::atomic::AtomicU32::new(0),
        }
    }

    /// Change the result returned by later calls
    pub fn set_result(&self, result: Result<(), String>) {
        if let Ok(mut guard) = self.result.lock() {
            *guard = result;
        }
    }

    pub fn calls(&self) -> u32 {
        self.call_count.load(std::sync::atomic::Ordering::Relaxed)
    }
}

#[cfg(test)]
#[async_trait]
impl DependencyProbe for MockProbe {
    fn name(&self) -> &str {
        "mock"
    }

    async fn query(&self) -> Result<(), ProbeError> {
        self.call_count
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        let guard = self
            .result
            .lock()
            .map_err(|_| ProbeError::Other("lock poisoned".into()))?;

        guard.clone().map_err(ProbeError::Other)
    }
}
