//! In-memory store implementation - the default when no data directory
//! is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ellaia_core::StoreError;
use ellaia_core::ports::CollectionStore;

/// In-memory store using a simple HashMap with async RwLock.
///
/// Note: data is lost on process exit - it mimics a fresh browser tab
/// rather than persisted local storage.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_and_get() {
        let store = MemoryStore::new();
        store.set("ellaia_tags", "[]").await.unwrap();
        assert_eq!(
            store.get("ellaia_tags").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("ellaia_tags", "[]").await.unwrap();
        store.remove("ellaia_tags").await.unwrap();
        store.remove("ellaia_tags").await.unwrap();
        assert_eq!(store.get("ellaia_tags").await.unwrap(), None);
    }
}
