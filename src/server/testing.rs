//! Helpers for router tests

use super::{serve, shutdown_pair, ShutdownTrigger};
use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A router served on an ephemeral loopback port
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    trigger: ShutdownTrigger,
    handle: JoinHandle<Result<(), super::ServerError>>,
}

impl TestServer {
    /// Bind before spawning, so requests can be sent immediately
    pub async fn start(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (trigger, listener_signal) = shutdown_pair();
        let handle = tokio::spawn(serve(listener, app, listener_signal));

        Self {
            addr,
            client: reqwest::Client::new(),
            trigger,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// GET `path`, returning status and body
    pub async fn get(&self, path: &str) -> (u16, String) {
        let response = self
            .client
            .get(self.url(path))
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .expect("Failed to connect to test server");
        let status = response.status().as_u16();
        (status, response.text().await.unwrap())
    }

    /// Trigger graceful shutdown and wait for the server task to end
    pub async fn stop(self) {
        self.trigger.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not shut down")
            .unwrap()
            .unwrap();
    }
}
