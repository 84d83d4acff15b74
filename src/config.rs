//! Environment configuration for the probe services
//!
//! Every loader takes a lookup function so tests can feed variables without
//! touching the process environment. Empty values count as unset.

use crate::readiness::{ReadinessMode, DEFAULT_READINESS_DELAY};
use std::time::Duration;
use thiserror::Error;

/// Default port for the notify and access services
pub const DEFAULT_PORT: u16 = 8080;

/// Default port for the frontend
pub const DEFAULT_FRONTEND_PORT: u16 = 80;

/// Default backend probed by the frontend
pub const DEFAULT_BACKEND_URL: &str = "http://backend:5678";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Route family for liveness/readiness endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthPrefix {
    /// `/health/live`, `/health/ready`
    #[default]
    Health,
    /// `/healthz/live`, `/healthz/ready`
    Healthz,
}

impl HealthPrefix {
    pub fn live_path(&self) -> &'static str {
        match self {
            HealthPrefix::Health => "/health/live",
            HealthPrefix::Healthz => "/healthz/live",
        }
    }

    pub fn ready_path(&self) -> &'static str {
        match self {
            HealthPrefix::Health => "/health/ready",
            HealthPrefix::Healthz => "/healthz/ready",
        }
    }
}

/// Settings for `notify-service`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub port: u16,
    pub prefix: HealthPrefix,
    pub readiness: ReadinessMode,
}

impl NotifyConfig {
    /// Read from the process environment
    ///
    /// - PORT: listening port (default: 8080)
    /// - HEALTH_PREFIX: "health" or "healthz" (default: health)
    /// - READINESS_MODE: "gated" or "always" (default: gated)
    /// - READINESS_DELAY_SECS: startup delay in gated mode (default: 15)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_port(&lookup, DEFAULT_PORT)?;

        let prefix = match non_empty(&lookup, "HEALTH_PREFIX").as_deref() {
            None | Some("health") => HealthPrefix::Health,
            Some("healthz") => HealthPrefix::Healthz,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "HEALTH_PREFIX",
                    value: other.to_string(),
                    reason: "expected \"health\" or \"healthz\"",
                })
            }
        };

        let readiness = match non_empty(&lookup, "READINESS_MODE").as_deref() {
            None | Some("gated") => ReadinessMode::Gated {
                delay: parse_delay(&lookup)?,
            },
            Some("always") => ReadinessMode::AlwaysReady,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "READINESS_MODE",
                    value: other.to_string(),
                    reason: "expected \"gated\" or \"always\"",
                })
            }
        };

        Ok(Self {
            port,
            prefix,
            readiness,
        })
    }
}

/// Settings for `access-probe`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessConfig {
    pub port: u16,
    /// Namespace to list pods in; `None` lists across all namespaces
    pub namespace: Option<String>,
}

impl AccessConfig {
    /// - PORT: listening port (default: 8080)
    /// - PROBE_NAMESPACE: namespace for the pod list (default: all)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parse_port(&lookup, DEFAULT_PORT)?,
            namespace: non_empty(&lookup, "PROBE_NAMESPACE"),
        })
    }
}

/// Settings for `frontend`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    pub port: u16,
    pub backend_url: String,
    pub hostname: String,
}

impl FrontendConfig {
    /// - PORT: listening port (default: 80)
    /// - BACKEND_URL: backend to probe (default: http://backend:5678)
    /// - HOSTNAME: name reported in greetings (default: the system host name,
    ///   or "unknown" if the OS cannot report one)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parse_port(&lookup, DEFAULT_FRONTEND_PORT)?,
            backend_url: non_empty(&lookup, "BACKEND_URL")
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            hostname: non_empty(&lookup, "HOSTNAME").unwrap_or_else(system_hostname),
        })
    }
}

/// Host name as reported by the OS
pub fn system_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.trim().is_empty())
}

fn parse_port<F>(lookup: &F, default: u16) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup, "PORT") {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value,
                reason: "expected a port number",
            }),
    }
}

fn parse_delay<F>(lookup: &F) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup, "READINESS_DELAY_SECS") {
        None => Ok(DEFAULT_READINESS_DELAY),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidValue {
                name: "READINESS_DELAY_SECS",
                value,
                reason: "expected whole seconds",
            }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "config_test.rs"]
mod tests;
