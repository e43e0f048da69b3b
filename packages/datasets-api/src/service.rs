//! Dataset operations over the config store and ThreatExchange.

use crate::model::{DatasetConfig, PrivacyGroupId};
use crate::response::Dataset;
use crate::schemas::{CreateDatasetRequest, UpdateDatasetRequest};
use crate::store::ConfigStore;
use crate::threatexchange::CollaborationSource;
use crate::Error;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Readable groups reported by ThreatExchange.
    pub seen: usize,
    /// Groups that had no dataset config and got one.
    pub created: usize,
}

/// Stateless between requests; the store owns every record.
pub struct DatasetService {
    store: Arc<dyn ConfigStore>,
    source: Arc<dyn CollaborationSource>,
}

impl DatasetService {
    pub fn new(store: Arc<dyn ConfigStore>, source: Arc<dyn CollaborationSource>) -> Self {
        Self { store, source }
    }

    pub async fn list(&self) -> Result<Vec<Dataset>, Error> {
        let configs = self.store.get_all().await?;
        Ok(configs.into_iter().map(Dataset::from).collect())
    }

    /// Toggle fetcher/matcher/write-back. Last writer wins.
    ///
    /// The record is read, modified and written back as a whole, with no
    /// lock or version check in between. A delete that lands between the
    /// read and the write is undone: the dataset reappears with the new
    /// flags. Concurrent updates of the same id keep whichever wrote last.
    pub async fn update(&self, request: UpdateDatasetRequest) -> Result<Dataset, Error> {
        let mut config = self.require(&request.privacy_group_id).await?;
        request.apply(&mut config);
        self.store.upsert(&config).await?;

        info!(
            privacy_group_id = %config.privacy_group_id,
            fetcher_active = config.fetcher_active,
            matcher_active = config.matcher_active,
            write_back = config.write_back,
            "Dataset updated"
        );
        Ok(config.into())
    }

    /// Create a dataset unless one already exists for the id. An existing
    /// record is left as is and the call still succeeds.
    pub async fn create(&self, request: CreateDatasetRequest) -> Result<PrivacyGroupId, Error> {
        let config = request.into_config();
        if self.store.create_if_absent(&config).await? {
            info!(privacy_group_id = %config.privacy_group_id, "Dataset created");
        } else {
            warn!(
                privacy_group_id = %config.privacy_group_id,
                "Dataset already exists, create ignored"
            );
        }
        Ok(config.privacy_group_id)
    }

    /// Add a dataset for every readable ThreatExchange privacy group that has
    /// none. Existing datasets are never modified.
    pub async fn sync(&self) -> Result<SyncReport, Error> {
        let groups = self.source.privacy_groups().await?;
        let mut report = SyncReport::default();

        for group in groups.into_iter().filter(|g| g.threat_updates_enabled) {
            report.seen += 1;
            let config = group.into_config();
            if self.store.create_if_absent(&config).await? {
                report.created += 1;
                info!(
                    privacy_group_id = %config.privacy_group_id,
                    name = %config.privacy_group_name,
                    "Dataset added from ThreatExchange"
                );
            }
        }

        info!(seen = report.seen, created = report.created, "Privacy groups synced");
        Ok(report)
    }

    pub async fn delete(&self, id: &PrivacyGroupId) -> Result<(), Error> {
        self.require(id).await?;
        self.store.delete(id).await?;
        info!(privacy_group_id = %id, "Dataset deleted");
        Ok(())
    }

    async fn require(&self, id: &PrivacyGroupId) -> Result<DatasetConfig, Error> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("no dataset for privacy group {id}")))
    }
}
