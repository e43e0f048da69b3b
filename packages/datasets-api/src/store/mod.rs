//! Dataset config storage.
//!
//! The store is the only owner of dataset records. Every record is keyed by
//! its privacy-group id.

mod memory;
mod redis_store;

pub use self::memory::InMemoryConfigStore;
pub use self::redis_store::RedisConfigStore;

use crate::model::{DatasetConfig, PrivacyGroupId};
use crate::Error;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, id: &PrivacyGroupId) -> Result<Option<DatasetConfig>, Error>;

    /// All records, in the backend's enumeration order.
    async fn get_all(&self) -> Result<Vec<DatasetConfig>, Error>;

    /// Insert or overwrite.
    async fn upsert(&self, config: &DatasetConfig) -> Result<(), Error>;

    /// Insert only when no record with the same id exists. Returns `false`
    /// and leaves the existing record untouched otherwise.
    async fn create_if_absent(&self, config: &DatasetConfig) -> Result<bool, Error>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, id: &PrivacyGroupId) -> Result<bool, Error>;
}
