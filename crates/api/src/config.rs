//! Process configuration read once at startup.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `STOREFRONT_BIND_ADDR` | listen address | `0.0.0.0:8080` |
//! | `STOREFRONT_REQUEST_TIMEOUT_MS` | per-request timeout | `10000` |
//!
//! Store selection is delegated to [`StoreConfig`].

use std::net::SocketAddr;
use std::time::Duration;

use storefront_infra::{ConfigError, StoreConfig};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub store: StoreConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default_addr: SocketAddr = DEFAULT_BIND_ADDR
            .parse()
            .unwrap_or(SocketAddr::from(([0, 0, 0, 0], 8080)));

        let bind_addr = match lookup("STOREFRONT_BIND_ADDR") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid STOREFRONT_BIND_ADDR; using {DEFAULT_BIND_ADDR}");
                default_addr
            }),
            None => default_addr,
        };

        let request_timeout = match lookup("STOREFRONT_REQUEST_TIMEOUT_MS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!(value = %raw, "invalid STOREFRONT_REQUEST_TIMEOUT_MS; using default");
                    DEFAULT_REQUEST_TIMEOUT
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            bind_addr,
            request_timeout,
            store: StoreConfig::from_lookup(&lookup)?,
        })
    }
}
