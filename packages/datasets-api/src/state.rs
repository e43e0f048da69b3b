//! Application state shared across handlers.

use crate::config::{Config, StoreBackend};
use crate::service::DatasetService;
use crate::store::{ConfigStore, InMemoryConfigStore, RedisConfigStore};
use crate::threatexchange::{CollaborationSource, ThreatExchangeClient};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Shared application state. Built once at startup, read-only afterwards
/// apart from the request counter.
pub struct AppState {
    pub config: Config,
    pub datasets: DatasetService,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Connect the configured store and build the ThreatExchange client.
    pub async fn new(config: Config) -> Result<Self, crate::Error> {
        let store: Arc<dyn ConfigStore> = match config.store_backend {
            StoreBackend::Redis => {
                Arc::new(RedisConfigStore::connect(&config.redis_url, &config.key_prefix).await?)
            }
            StoreBackend::Memory => {
                warn!("Using in-memory config store, datasets are lost on restart");
                Arc::new(InMemoryConfigStore::new())
            }
        };

        let source = Arc::new(ThreatExchangeClient::new(
            &config.api_base_url,
            config.api_token.clone(),
            config.upstream_timeout(),
        )?);

        info!(store = config.store_backend.as_str(), "Dataset service ready");

        Ok(Self::with_parts(config, store, source))
    }

    /// Assemble state from already-built collaborators.
    pub fn with_parts(
        config: Config,
        store: Arc<dyn ConfigStore>,
        source: Arc<dyn CollaborationSource>,
    ) -> Self {
        Self {
            config,
            datasets: DatasetService::new(store, source),
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }
}
