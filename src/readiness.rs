//! Readiness gate for simulated slow startup
//!
//! The gate starts closed and opens exactly once, when the background
//! initialization task finishes its delay. Request handlers hold a clone
//! of the gate and may only read it.

use crate::clock::Clock;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;

/// Default simulated startup time (loading config, connecting to dependencies)
pub const DEFAULT_READINESS_DELAY: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("Initialization was already started for this gate")]
    AlreadyStarted,

    #[error("Initialization task did not complete: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// How the readiness endpoint decides its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessMode {
    /// Report not ready until the initialization delay has elapsed
    Gated { delay: Duration },
    /// Skip the gate and always report ready
    AlwaysReady,
}

impl ReadinessMode {
    /// Delay before the gate opens; always-ready services open it immediately
    pub fn delay(&self) -> Duration {
        match self {
            ReadinessMode::Gated { delay } => *delay,
            ReadinessMode::AlwaysReady => Duration::ZERO,
        }
    }
}

impl Default for ReadinessMode {
    fn default() -> Self {
        ReadinessMode::Gated {
            delay: DEFAULT_READINESS_DELAY,
        }
    }
}

/// Shared one-way readiness flag
///
/// `None` means not ready; `Some(t)` means ready since `t`. Once set the
/// value is never cleared.
#[derive(Debug, Clone, Default)]
pub struct ReadinessGate {
    ready_since: Arc<RwLock<Option<DateTime<Utc>>>>,
    started: Arc<AtomicBool>,
}

impl ReadinessGate {
    /// Create a closed gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether initialization has completed
    pub fn is_ready(&self) -> bool {
        self.ready_since().is_some()
    }

    /// When the gate opened, if it has
    pub fn ready_since(&self) -> Option<DateTime<Utc>> {
        // A poisoned lock still holds a consistent Option
        *self.ready_since.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Spawn the background task that opens the gate after `delay`
    ///
    /// The deadline is taken from `clock` before the task is spawned, so
    /// time that passes before the task first runs still counts.
    ///
    /// # Errors
    /// Returns `ReadinessError::AlreadyStarted` if called more than once
    /// on the same gate (or any of its clones).
    pub fn start_initialization(
        &self,
        delay: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Initialization, ReadinessError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(ReadinessError::AlreadyStarted);
        }

        let started_at = clock.now();
        let deadline = chrono::Duration::from_std(delay)
            .ok()
            .and_then(|d| started_at.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        info!(delay_ms = delay.as_millis() as u64, "Starting initialization");

        let gate = self.clone();
        let handle = tokio::spawn(async move {
            clock.sleep_until(deadline).await;
            let now = clock.now();
            gate.open(now);
            info!(
                elapsed_ms = (now - started_at).num_milliseconds(),
                "Service is now ready to accept traffic"
            );
        });

        Ok(Initialization { handle })
    }

    fn open(&self, at: DateTime<Utc>) {
        let mut guard = self.ready_since.write().unwrap_or_else(|e| e.into_inner());
        if guard.is_none() {
            *guard = Some(at);
        }
    }
}

/// Handle to the background initialization task
///
/// Owned by the server lifecycle: awaited in tests, aborted on shutdown.
#[derive(Debug)]
pub struct Initialization {
    handle: JoinHandle<()>,
}

impl Initialization {
    /// Wait for the gate to open
    pub async fn wait(self) -> Result<(), ReadinessError> {
        self.handle.await?;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel a pending initialization (shutdown before the delay elapsed)
    pub fn abort(&self) {
        self.handle.abort();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "readiness_test.rs"]
mod tests;
