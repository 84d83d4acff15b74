//! Backend reachability probe
//!
//! Fetches the backend URL and reads the body. Any response counts as
//! reachable, including error statuses; only transport or read failures
//! fail the check.

use super::{DependencyProbe, ProbeError};
use async_trait::async_trait;
use tracing::info;

pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DependencyProbe for HttpProbe {
    fn name(&self) -> &str {
        &self.url
    }

    async fn query(&self) -> Result<(), ProbeError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        info!(
            backend = %self.url,
            status = status.as_u16(),
            body = %body.trim_end(),
            "Connected to backend"
        );
        Ok(())
    }
}
