//! Cluster API permission probe
//!
//! Lists at most one pod with the service account's credentials. The
//! result contents are ignored; only whether the API call errored matters,
//! so a missing RBAC grant shows up as a failed check.

use super::{DependencyProbe, ProbeError};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams};
use kube::Client;
use tracing::info;

/// Bounded "list pods" query used as a startup probe
pub struct PodListProbe {
    api: Api<Pod>,
    scope: String,
}

impl PodListProbe {
    /// Probe pods in `namespace`, or across all namespaces when `None`
    pub fn new(client: Client, namespace: Option<&str>) -> Self {
        match namespace {
            Some(ns) => Self {
                api: Api::namespaced(client, ns),
                scope: format!("pods/{}", ns),
            },
            None => Self {
                api: Api::all(client),
                scope: "pods/*".to_string(),
            },
        }
    }

    /// Build a client from in-cluster service account credentials
    ///
    /// # Errors
    /// Fails outside a pod (no service account token or API host env vars).
    pub fn in_cluster(namespace: Option<&str>) -> Result<Self, ProbeError> {
        let config = kube::Config::incluster()?;
        let client = Client::try_from(config)?;
        info!(
            namespace = namespace.unwrap_or("<all>"),
            "Kubernetes client created from in-cluster config"
        );
        Ok(Self::new(client, namespace))
    }
}

#[async_trait]
impl DependencyProbe for PodListProbe {
    fn name(&self) -> &str {
        &self.scope
    }

    async fn query(&self) -> Result<(), ProbeError> {
        self.api.list(&ListParams::default().limit(1)).await?;
        Ok(())
    }
}
