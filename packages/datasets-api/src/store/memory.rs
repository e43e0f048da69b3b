//! Process-local store for development and tests.

use super::ConfigStore;
use crate::model::{DatasetConfig, PrivacyGroupId};
use crate::Error;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryConfigStore {
    records: RwLock<BTreeMap<PrivacyGroupId, DatasetConfig>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn get(&self, id: &PrivacyGroupId) -> Result<Option<DatasetConfig>, Error> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<DatasetConfig>, Error> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn upsert(&self, config: &DatasetConfig) -> Result<(), Error> {
        self.records
            .write()
            .await
            .insert(config.privacy_group_id.clone(), config.clone());
        Ok(())
    }

    async fn create_if_absent(&self, config: &DatasetConfig) -> Result<bool, Error> {
        let mut records = self.records.write().await;
        if records.contains_key(&config.privacy_group_id) {
            return Ok(false);
        }
        records.insert(config.privacy_group_id.clone(), config.clone());
        Ok(true)
    }

    async fn delete(&self, id: &PrivacyGroupId) -> Result<bool, Error> {
        Ok(self.records.write().await.remove(id).is_some())
    }
}
