//! Graceful shutdown for the probe services
//!
//! SIGTERM (sent by the kubelet) or SIGINT flips a watch channel. The HTTP
//! server stops accepting connections and drains in-flight requests; the
//! binary then aborts any pending initialization.

use tokio::sync::watch;
use tracing::info;

/// Termination signal that started the shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Terminate,
    Interrupt,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Terminate => write!(f, "SIGTERM"),
            Signal::Interrupt => write!(f, "SIGINT"),
        }
    }
}

/// Sending half, held by whoever decides to stop the service
pub struct ShutdownTrigger {
    sender: watch::Sender<bool>,
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.sender.send_replace(true);
        info!("Shutdown triggered");
    }
}

/// Receiving half, cloned into every component that must stop
#[derive(Clone)]
pub struct ShutdownListener {
    receiver: watch::Receiver<bool>,
}

impl ShutdownListener {
    /// Resolve once shutdown is triggered or the trigger is dropped
    pub async fn triggered(mut self) {
        // Err means the trigger was dropped, which also ends the service
        let _ = self.receiver.wait_for(|stop| *stop).await;
    }

    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }
}

/// Create a connected trigger/listener pair
pub fn shutdown_pair() -> (ShutdownTrigger, ShutdownListener) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownTrigger { sender }, ShutdownListener { receiver })
}

/// Wait for SIGTERM or SIGINT
///
/// # Errors
/// Fails if the signal handlers cannot be registered.
#[cfg(unix)]
pub async fn wait_for_signal() -> std::io::Result<Signal> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let received = tokio::select! {
        _ = sigterm.recv() => Signal::Terminate,
        _ = sigint.recv() => Signal::Interrupt,
    };
    info!(signal = %received, "Received termination signal");
    Ok(received)
}

/// Wait for Ctrl+C (non-unix)
#[cfg(not(unix))]
pub async fn wait_for_signal() -> std::io::Result<Signal> {
    tokio::signal::ctrl_c().await?;
    info!(signal = %Signal::Interrupt, "Received termination signal");
    Ok(Signal::Interrupt)
}

/// Spawn a task that triggers shutdown when a termination signal arrives
///
/// If the handlers cannot be registered the service keeps running and
/// relies on the orchestrator's hard kill.
pub fn trigger_on_signal(trigger: ShutdownTrigger) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(_) => trigger.trigger(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to register signal handlers");
                // Keep the trigger alive so listeners do not see a drop
                std::future::pending::<()>().await;
            }
        }
    })
}
