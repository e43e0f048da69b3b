//! Redis-backed store. All records live in one hash: field = privacy-group id,
//! value = JSON-encoded [`DatasetConfig`].

use super::ConfigStore;
use crate::model::{DatasetConfig, PrivacyGroupId};
use crate::Error;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

pub struct RedisConfigStore {
    conn: ConnectionManager,
    hash_key: String,
}

impl RedisConfigStore {
    /// Connect once at startup. The connection manager reconnects on its own.
    pub async fn connect(url: &str, key_prefix: &str) -> Result<Self, Error> {
        let client = redis::Client::open(url)
            .map_err(|e| Error::Config(format!("Invalid redis url: {e}")))?;
        let conn = ConnectionManager::new(client).await?;
        let hash_key = hash_key(key_prefix);

        info!(key = %hash_key, "Connected to redis config store");

        Ok(Self { conn, hash_key })
    }
}

fn hash_key(prefix: &str) -> String {
    format!("{}:datasets", prefix.trim_end_matches(':'))
}

fn encode(config: &DatasetConfig) -> Result<String, Error> {
    serde_json::to_string(config)
        .map_err(|e| Error::Upstream(format!("Failed to encode dataset config: {e}")))
}

fn decode(field: &str, raw: &str) -> Result<DatasetConfig, Error> {
    serde_json::from_str(raw)
        .map_err(|e| Error::Upstream(format!("Corrupt dataset config for {field}: {e}")))
}

#[async_trait]
impl ConfigStore for RedisConfigStore {
    async fn get(&self, id: &PrivacyGroupId) -> Result<Option<DatasetConfig>, Error> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.hget(&self.hash_key, id.as_str()).await?;
        raw.map(|r| decode(id.as_str(), &r)).transpose()
    }

    async fn get_all(&self) -> Result<Vec<DatasetConfig>, Error> {
        let mut conn = self.conn.clone();
        let entries: Vec<(String, String)> = conn.hgetall(&self.hash_key).await?;
        debug!(count = entries.len(), "Loaded dataset configs");
        entries
            .iter()
            .map(|(field, raw)| decode(field, raw))
            .collect()
    }

    async fn upsert(&self, config: &DatasetConfig) -> Result<(), Error> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .hset(&self.hash_key, config.privacy_group_id.as_str(), encode(config)?)
            .await?;
        Ok(())
    }

    async fn create_if_absent(&self, config: &DatasetConfig) -> Result<bool, Error> {
        let mut conn = self.conn.clone();
        let created: bool = conn
            .hset_nx(&self.hash_key, config.privacy_group_id.as_str(), encode(config)?)
            .await?;
        Ok(created)
    }

    async fn delete(&self, id: &PrivacyGroupId) -> Result<bool, Error> {
        let mut conn = self.conn.clone();
        let removed: u32 = conn.hdel(&self.hash_key, id.as_str()).await?;
        Ok(removed > 0)
    }
}
