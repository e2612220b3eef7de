//! Test fakes for the storage and fixture ports, plus repository
//! constructors used across the unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{FixtureError, StoreError};
use crate::ports::{CollectionStore, FixtureSource};
use crate::repository::{Repository, RepositoryConfig};

/// In-memory key/value store fake.
#[derive(Default)]
pub struct FakeStore {
    entries: RwLock<HashMap<String, String>>,
}

impl FakeStore {
    pub async fn seed_key(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }
}

#[async_trait]
impl CollectionStore for FakeStore {
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

/// Fixture source fake backed by a name-to-JSON map.
#[derive(Default)]
pub struct FakeFixtures {
    assets: HashMap<String, String>,
}

impl FakeFixtures {
    pub fn with(name: &str, raw: &str) -> Self {
        Self::default().and(name, raw)
    }

    pub fn and(mut self, name: &str, raw: &str) -> Self {
        self.assets.insert(name.to_string(), raw.to_string());
        self
    }

    /// Empty arrays for every seeded collection.
    pub fn empty_collections() -> Self {
        let mut fixtures = Self::default();
        for name in crate::store::SEEDED_COLLECTIONS {
            fixtures.assets.insert(name.to_string(), "[]".to_string());
        }
        fixtures
    }
}

#[async_trait]
impl FixtureSource for FakeFixtures {
    async fn load(&self, name: &str) -> Result<String, FixtureError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| FixtureError::NotFound(name.to_string()))
    }
}

/// Zero-latency repository over empty fixtures.
pub fn instant_repo() -> Repository {
    Repository::new(
        Arc::new(FakeStore::default()),
        Arc::new(FakeFixtures::empty_collections()),
        RepositoryConfig::instant(),
    )
}

/// Zero-latency repository whose fixture source knows nothing.
pub fn repo_without_fixture() -> Repository {
    Repository::new(
        Arc::new(FakeStore::default()),
        Arc::new(FakeFixtures::default()),
        RepositoryConfig::instant(),
    )
}

/// Shared handle variant for the service tests.
pub fn instant_repo_arc() -> Arc<Repository> {
    Arc::new(instant_repo())
}
