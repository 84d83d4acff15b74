use probe_drills::clock::SystemClock;
use probe_drills::config::NotifyConfig;
use probe_drills::logging;
use probe_drills::readiness::{ReadinessGate, ReadinessMode};
use probe_drills::server::{
    bind, notify_router, notify_routes, serve, shutdown_pair, trigger_on_signal, NotifyState,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    info!("Starting notify-service initialization");

    let config = match NotifyConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    // Simulate slow startup (loading config, connecting to dependencies)
    info!(mode = ?config.readiness, "Loading configuration and connecting to dependencies");
    let readiness = ReadinessGate::new();
    let initialization =
        readiness.start_initialization(config.readiness.delay(), Arc::new(SystemClock))?;

    if config.readiness == ReadinessMode::AlwaysReady {
        info!("Readiness gate disabled - readiness probe always succeeds");
    }

    info!("Available routes:");
    for (method, route) in notify_routes(config.prefix) {
        info!("  {} {}", method, route);
    }

    let listener = match bind(config.port).await {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, "Failed to start notify-service");
            return Err(e.into());
        }
    };
    info!(port = config.port, "Starting notify-service");

    let (trigger, shutdown) = shutdown_pair();
    let signal_handle = trigger_on_signal(trigger);

    let app = notify_router(config.prefix, NotifyState::new(readiness, config.readiness));
    let result = serve(listener, app, shutdown).await;

    // Shutdown before the delay elapsed leaves nothing to wait for
    initialization.abort();
    signal_handle.abort();

    if let Err(e) = result {
        error!(error = %e, "Server crashed");
        return Err(e.into());
    }

    info!("notify-service shut down gracefully");
    Ok(())
}
