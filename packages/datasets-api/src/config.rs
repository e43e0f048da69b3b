//! Service configuration.

use serde::Deserialize;
use std::time::Duration;

/// Which backend holds dataset configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Redis,
    /// Process-local map. Records are lost on restart.
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Redis => "redis",
            StoreBackend::Memory => "memory",
        }
    }
}

/// Configuration for the datasets API.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    #[serde(default = "defaults::store_backend")]
    pub store_backend: StoreBackend,

    #[serde(default = "defaults::redis_url")]
    pub redis_url: String,

    /// Namespace for keys written to the config store.
    #[serde(default = "defaults::key_prefix")]
    pub key_prefix: String,

    #[serde(default = "defaults::api_base_url")]
    pub api_base_url: String,

    /// ThreatExchange access token. Sync fails with an upstream error when unset.
    #[serde(default = "defaults::api_token")]
    pub api_token: Option<String>,

    /// Deadline for a whole request. Expiry answers 504.
    #[serde(default = "defaults::request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Deadline for each ThreatExchange call.
    #[serde(default = "defaults::upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Capped below the request deadline so a slow upstream surfaces as a
    /// 502 with a body instead of the router's bare 504.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs).min(self.request_timeout().mul_f64(0.75))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            store_backend: defaults::store_backend(),
            redis_url: defaults::redis_url(),
            key_prefix: defaults::key_prefix(),
            api_base_url: defaults::api_base_url(),
            api_token: defaults::api_token(),
            request_timeout_secs: defaults::request_timeout_secs(),
            upstream_timeout_secs: defaults::upstream_timeout_secs(),
        }
    }
}

mod defaults {
    use super::StoreBackend;

    pub fn bind_address() -> String {
        "0.0.0.0:3050".into()
    }

    pub fn store_backend() -> StoreBackend {
        StoreBackend::Redis
    }

    pub fn redis_url() -> String {
        "redis://127.0.0.1:6379".into()
    }

    pub fn key_prefix() -> String {
        "hma:config".into()
    }

    pub fn api_base_url() -> String {
        "https://graph.facebook.com/v12.0".into()
    }

    pub fn api_token() -> Option<String> {
        // Conventional ThreatExchange token variable; empty counts as unset.
        std::env::var("TX_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
    }

    pub fn request_timeout_secs() -> u64 {
        30
    }

    pub fn upstream_timeout_secs() -> u64 {
        20
    }
}
