//! Persistent store adapter: named collections as serialized arrays over
//! a key/value store, with one-time seeding from bundled fixtures.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{FixtureError, StoreError};
use crate::ports::{CollectionStore, FixtureSource};

/// Default key prefix, matching the original `ellaia_` storage layout.
pub const DEFAULT_KEY_PREFIX: &str = "ellaia_";

/// The entity collections seeded from fixtures. Contact submissions are
/// deliberately absent - that flow never reads the store back.
pub const SEEDED_COLLECTIONS: [&str; 5] = ["posts", "categories", "authors", "comments", "tags"];

/// Wraps a [`CollectionStore`] under a fixed key prefix and owns seeding
/// from a [`FixtureSource`].
///
/// There is no locking: concurrent writers over a shared backing store
/// (the two-browser-tab situation) race with last-write-wins. That is a
/// documented limitation of the demo scope, not something this layer
/// tries to fix.
pub struct StoreAdapter {
    store: Arc<dyn CollectionStore>,
    fixtures: Arc<dyn FixtureSource>,
    prefix: String,
}

impl StoreAdapter {
    pub fn new(store: Arc<dyn CollectionStore>, fixtures: Arc<dyn FixtureSource>) -> Self {
        Self::with_prefix(store, fixtures, DEFAULT_KEY_PREFIX)
    }

    pub fn with_prefix(
        store: Arc<dyn CollectionStore>,
        fixtures: Arc<dyn FixtureSource>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            fixtures,
            prefix: prefix.into(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Read and deserialize a collection; `None` if never written.
    pub async fn read_collection<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<Vec<T>>, StoreError> {
        match self.store.get(&self.key(name)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and overwrite a collection wholesale.
    pub async fn write_collection<T: Serialize>(
        &self,
        name: &str,
        records: &[T],
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        self.store.set(&self.key(name), &raw).await
    }

    /// Load and parse the bundled fixture for `name`.
    pub async fn load_fixture<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, FixtureError> {
        let raw = self.fixtures.load(name).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Seed every recognized collection that has never been written.
    ///
    /// Failures are logged and swallowed; seeding must never abort
    /// startup.
    pub async fn seed_if_absent(&self) {
        for name in SEEDED_COLLECTIONS {
            match self.store.get(&self.key(name)).await {
                Ok(Some(_)) => continue,
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(collection = name, error = %err, "seed check failed");
                    continue;
                }
            }

            let raw = match self.fixtures.load(name).await {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::warn!(collection = name, error = %err, "failed to load fixture");
                    continue;
                }
            };

            if let Err(err) = self.store.set(&self.key(name), &raw).await {
                tracing::warn!(collection = name, error = %err, "failed to seed collection");
            } else {
                tracing::debug!(collection = name, "seeded from fixture");
            }
        }
    }

    /// Clear all recognized collections and reseed. Development use only.
    pub async fn reset(&self) {
        for name in SEEDED_COLLECTIONS {
            if let Err(err) = self.store.remove(&self.key(name)).await {
                tracing::warn!(collection = name, error = %err, "failed to clear collection");
            }
        }
        self.seed_if_absent().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeFixtures, FakeStore};

    fn adapter_with(posts_fixture: &str) -> StoreAdapter {
        let store = Arc::new(FakeStore::default());
        let fixtures = Arc::new(FakeFixtures::with("posts", posts_fixture));
        StoreAdapter::new(store, fixtures)
    }

    #[tokio::test]
    async fn seeds_only_missing_collections() {
        let store = Arc::new(FakeStore::default());
        store
            .seed_key("ellaia_posts", r#"[{"already":"here"}]"#)
            .await;
        let fixtures = Arc::new(FakeFixtures::with("posts", r#"[{"from":"fixture"}]"#));
        let adapter = StoreAdapter::new(store.clone(), fixtures);

        adapter.seed_if_absent().await;

        let kept = store.raw("ellaia_posts").await;
        assert_eq!(kept.as_deref(), Some(r#"[{"already":"here"}]"#));
    }

    #[tokio::test]
    async fn seeding_failure_is_swallowed() {
        // Fixture source only knows "posts"; the other four load attempts
        // fail and must not propagate.
        let adapter = adapter_with("[]");
        adapter.seed_if_absent().await;
    }

    #[tokio::test]
    async fn reset_clears_and_reseeds_every_collection() {
        let tags_fixture = r#"[{"id":"t1","slug":"x","name":"x"}]"#;
        let categories_fixture =
            r#"[{"id":"c1","slug":"y","name":"y","description":"","color":""}]"#;

        let store = Arc::new(FakeStore::default());
        let fixtures = Arc::new(
            FakeFixtures::with("tags", tags_fixture).and("categories", categories_fixture),
        );
        let adapter = StoreAdapter::new(store.clone(), fixtures);

        store.seed_key("ellaia_tags", r#"[]"#).await;
        store.seed_key("ellaia_categories", r#"[]"#).await;
        adapter.reset().await;

        assert_eq!(store.raw("ellaia_tags").await.as_deref(), Some(tags_fixture));
        assert_eq!(
            store.raw("ellaia_categories").await.as_deref(),
            Some(categories_fixture)
        );
    }

    #[tokio::test]
    async fn read_collection_absent_is_none() {
        let adapter = adapter_with("[]");
        let read: Option<Vec<serde_json::Value>> = adapter.read_collection("posts").await.unwrap();
        assert!(read.is_none());
    }
}
