use async_trait::async_trait;

use crate::error::StoreError;

/// Key/value string store holding one serialized collection per key.
///
/// Values are always rewritten wholesale; there are no partial or append
/// writes. Implementations provide no cross-process locking - two writers
/// over the same backing store race with last-write-wins.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Read the raw value under `key`; `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value under `key` entirely.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
