//! Response types for the datasets API.

use crate::model::{DatasetConfig, PrivacyGroupId};
use serde::Serialize;

/// Wire form of a dataset config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub privacy_group_id: PrivacyGroupId,
    pub privacy_group_name: String,
    pub description: String,
    pub fetcher_active: bool,
    pub matcher_active: bool,
    pub write_back: bool,
    pub in_use: bool,
}

impl From<DatasetConfig> for Dataset {
    fn from(config: DatasetConfig) -> Self {
        Self {
            privacy_group_id: config.privacy_group_id,
            privacy_group_name: config.privacy_group_name,
            description: config.description,
            fetcher_active: config.fetcher_active,
            matcher_active: config.matcher_active,
            write_back: config.write_back,
            in_use: config.in_use,
        }
    }
}

/// Response from `GET /datasets/`.
#[derive(Debug, Serialize)]
pub struct DatasetsResponse {
    pub datasets_response: Vec<Dataset>,
}

/// Response from `POST /datasets/create`.
#[derive(Debug, Serialize)]
pub struct CreateDatasetResponse {
    pub response: String,
}

impl CreateDatasetResponse {
    pub fn new(id: &PrivacyGroupId) -> Self {
        Self {
            response: format!("Created dataset {id}"),
        }
    }
}

/// Response from `POST /datasets/sync`.
#[derive(Debug, Serialize)]
pub struct SyncDatasetResponse {
    pub response: &'static str,
}

impl Default for SyncDatasetResponse {
    fn default() -> Self {
        Self {
            response: "Privacy groups are up to date",
        }
    }
}

/// Response from `POST /datasets/delete/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteDatasetResponse {
    pub response: &'static str,
}

impl Default for DeleteDatasetResponse {
    fn default() -> Self {
        Self {
            response: "The privacy group is deleted",
        }
    }
}

/// Response from the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store_backend: &'static str,
    pub uptime_secs: u64,
    pub requests: u64,
}
