//! Minimal HTTP services for Kubernetes probe drills
//!
//! - `readiness` - one-way readiness gate opened by a delayed task
//! - `probe` - dependency checks (cluster API, HTTP backend)
//! - `server` - routers, serving, graceful shutdown
//! - `config` - environment configuration per service

pub mod clock;
pub mod config;
pub mod logging;
pub mod probe;
pub mod readiness;
pub mod server;
