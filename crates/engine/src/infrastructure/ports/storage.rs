//! Save-game storage port.

use async_trait::async_trait;

use super::StorageError;

/// String key-value storage for everything a playthrough persists.
///
/// Values are opaque strings; callers own the encoding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
