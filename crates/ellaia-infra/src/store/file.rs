//! File-backed store implementation - one JSON file per key under a data
//! directory, the closest stand-in for browser local storage.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use ellaia_core::StoreError;
use ellaia_core::ports::CollectionStore;

/// File-per-key store. Writes replace the whole file; there is no
/// cross-process locking, so concurrent processes over the same
/// directory race with last-write-wins.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl CollectionStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Backend(err.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Err(err) = tokio::fs::create_dir_all(&self.dir).await {
            return Err(StoreError::Backend(err.to_string()));
        }
        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Backend(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("ellaia_posts").await.unwrap(), None);
        store.set("ellaia_posts", r#"[{"id":"1"}]"#).await.unwrap();
        assert_eq!(
            store.get("ellaia_posts").await.unwrap(),
            Some(r#"[{"id":"1"}]"#.to_string())
        );

        store.remove("ellaia_posts").await.unwrap();
        assert_eq!(store.get("ellaia_posts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn creates_missing_data_directory_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("store");
        let store = FileStore::new(&nested);

        store.set("ellaia_tags", "[]").await.unwrap();
        assert!(nested.join("ellaia_tags.json").exists());
    }
}
