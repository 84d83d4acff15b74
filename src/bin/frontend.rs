//! Frontend whose health check reaches through to a backend

use probe_drills::config::FrontendConfig;
use probe_drills::logging;
use probe_drills::probe::HttpProbe;
use probe_drills::server::{
    bind, frontend_router, serve, shutdown_pair, trigger_on_signal, FrontendState,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = match FrontendConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    let backend = HttpProbe::new(config.backend_url.clone());
    info!(backend = %backend.url(), "Backend probe configured");

    let listener = match bind(config.port).await {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, "Failed to start frontend");
            return Err(e.into());
        }
    };
    info!(port = config.port, "Frontend running");

    let (trigger, shutdown) = shutdown_pair();
    let signal_handle = trigger_on_signal(trigger);

    let app = frontend_router(FrontendState::new(Arc::new(backend), &config.hostname));
    let result = serve(listener, app, shutdown).await;
    signal_handle.abort();

    if let Err(e) = result {
        error!(error = %e, "Server crashed");
        return Err(e.into());
    }

    info!("Frontend shut down gracefully");
    Ok(())
}
