//! Process-local storage, lost on exit.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{KeyValueStore, StorageError};

/// Key-value store kept in memory. Used for throwaway sessions and tests.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents, for assertions.
    #[cfg(test)]
    pub async fn dump(&self) -> HashMap<String, String> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
