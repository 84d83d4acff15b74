//! API whose startup probe depends on RBAC access to list pods

use probe_drills::config::AccessConfig;
use probe_drills::logging;
use probe_drills::probe::{DependencyProbe, PodListProbe};
use probe_drills::server::{access_router, bind, serve, shutdown_pair, trigger_on_signal};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    info!("Starting API");

    let config = match AccessConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    // Only in-cluster credentials: the probe exercises the pod's own service account
    let probe: Arc<dyn DependencyProbe> = match PodListProbe::in_cluster(config.namespace.as_deref())
    {
        Ok(p) => Arc::new(p),
        Err(e) => {
            error!(error = %e, "Failed to create Kubernetes client");
            return Err(e.into());
        }
    };

    let listener = match bind(config.port).await {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, "Failed to start API");
            return Err(e.into());
        }
    };
    info!(port = config.port, "Listening");

    let (trigger, shutdown) = shutdown_pair();
    let signal_handle = trigger_on_signal(trigger);

    let result = serve(listener, access_router(probe), shutdown).await;
    signal_handle.abort();

    if let Err(e) = result {
        error!(error = %e, "Server crashed");
        return Err(e.into());
    }

    info!("API shut down gracefully");
    Ok(())
}
