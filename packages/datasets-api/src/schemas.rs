//! Request bodies. Decoding is strict: missing, mistyped, and unknown fields
//! are all rejected before a handler runs.

use crate::model::{DatasetConfig, PrivacyGroupId};
use serde::Deserialize;

/// Body of `POST /datasets/create`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateDatasetRequest {
    pub privacy_group_id: PrivacyGroupId,
    pub privacy_group_name: String,
    pub description: String,
    pub fetcher_active: bool,
    pub matcher_active: bool,
    pub write_back: bool,
}

impl CreateDatasetRequest {
    /// A locally created dataset starts out in use.
    pub fn into_config(self) -> DatasetConfig {
        DatasetConfig {
            privacy_group_id: self.privacy_group_id,
            privacy_group_name: self.privacy_group_name,
            description: self.description,
            fetcher_active: self.fetcher_active,
            matcher_active: self.matcher_active,
            write_back: self.write_back,
            in_use: true,
        }
    }
}

/// Body of `POST /datasets/update`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDatasetRequest {
    pub privacy_group_id: PrivacyGroupId,
    pub fetcher_active: bool,
    pub matcher_active: bool,
    pub write_back: bool,
}

impl UpdateDatasetRequest {
    /// Overwrite the three toggles. Name, description and `in_use` are kept.
    pub fn apply(&self, config: &mut DatasetConfig) {
        config.fetcher_active = self.fetcher_active;
        config.matcher_active = self.matcher_active;
        config.write_back = self.write_back;
    }
}
