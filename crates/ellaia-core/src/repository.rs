//! Generic entity repository: collection-agnostic CRUD with simulated
//! network semantics over the store adapter.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use ellaia_shared::ApiResponse;

use crate::error::RepoError;
use crate::ports::{CollectionStore, FixtureSource};
use crate::store::StoreAdapter;

/// A persisted record type bound to a named collection.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name, also the fixture asset name.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// Typed merge-patch over an entity. Unset fields retain their prior
/// value; the record id is untouchable by construction.
pub trait Patch<T>: Send {
    fn apply(self, target: &mut T);
}

/// Repository tuning. The simulated latency mimics real network behavior
/// for UI development; tests run it at zero.
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    pub delay: Duration,
    pub key_prefix: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            key_prefix: crate::store::DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Zero-latency configuration for tests.
    pub fn instant() -> Self {
        Self {
            delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Collection-agnostic CRUD over the store adapter.
///
/// Every asynchronous operation resolves to an [`ApiResponse`] - raised
/// faults never escape the repository. Each instance owns its own
/// loading-flag registry (advisory only, keyed `operation_entity[_id]`);
/// there is no ambient or static state.
pub struct Repository {
    adapter: StoreAdapter,
    delay: Duration,
    loading: RwLock<HashMap<String, bool>>,
}

impl Repository {
    pub fn new(
        store: Arc<dyn CollectionStore>,
        fixtures: Arc<dyn FixtureSource>,
        config: RepositoryConfig,
    ) -> Self {
        Self {
            adapter: StoreAdapter::with_prefix(store, fixtures, config.key_prefix),
            delay: config.delay,
            loading: RwLock::new(HashMap::new()),
        }
    }

    /// The underlying adapter, for seeding and reset.
    pub fn adapter(&self) -> &StoreAdapter {
        &self.adapter
    }

    /// The configured simulated latency.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Advisory loading flag lookup; never triggers I/O.
    pub fn is_loading(&self, key: &str) -> bool {
        self.loading
            .read()
            .map(|flags| flags.get(key).copied().unwrap_or(false))
            .unwrap_or(false)
    }

    fn set_loading(&self, key: &str, value: bool) {
        if let Ok(mut flags) = self.loading.write() {
            flags.insert(key.to_string(), value);
        }
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Full collection read with fixture fallback: a never-written
    /// collection is loaded from its fixture and written back as a side
    /// effect.
    async fn load_collection<T: Entity>(&self) -> Result<Vec<T>, RepoError> {
        if let Some(records) = self.adapter.read_collection::<T>(T::COLLECTION).await? {
            return Ok(records);
        }

        let records = self.adapter.load_fixture::<T>(T::COLLECTION).await?;
        if let Err(err) = self.adapter.write_collection(T::COLLECTION, &records).await {
            tracing::warn!(
                collection = T::COLLECTION,
                error = %err,
                "failed to persist fixture fallback"
            );
        }
        Ok(records)
    }

    /// List the full collection. The loading flag for `get_<entity>` is
    /// set for the duration and cleared on success and failure alike.
    pub async fn list_all<T: Entity>(&self) -> ApiResponse<Vec<T>> {
        let loading_key = format!("get_{}", T::COLLECTION);
        self.set_loading(&loading_key, true);

        let outcome = self.load_collection::<T>().await;
        self.simulate_latency().await;
        self.set_loading(&loading_key, false);

        match outcome {
            Ok(records) => ApiResponse::ok(records),
            Err(err) => {
                tracing::warn!(collection = T::COLLECTION, error = %err, "list failed");
                ApiResponse::fail(format!("Failed to load {}: {}", T::COLLECTION, err))
            }
        }
    }

    /// Fetch one record by id. A miss is a *successful* response with no
    /// data and an explanatory message, not an error.
    pub async fn get_by_id<T: Entity>(&self, id: &str) -> ApiResponse<T> {
        let loading_key = format!("get_{}_{}", T::COLLECTION, id);
        self.set_loading(&loading_key, true);

        let response = self.list_all::<T>().await;
        self.set_loading(&loading_key, false);

        if !response.success {
            return response.cast();
        }

        match response
            .data
            .unwrap_or_default()
            .into_iter()
            .find(|record| record.id() == id)
        {
            Some(record) => ApiResponse::ok(record),
            None => ApiResponse::missing(format!("{} with id {} not found", T::COLLECTION, id)),
        }
    }

    /// Append a new record. The repository mints the id and hands it to
    /// `make`, so identity is assigned exactly once and never by a
    /// caller-visible payload.
    pub async fn create<T, F>(&self, make: F) -> ApiResponse<T>
    where
        T: Entity,
        F: FnOnce(String) -> T + Send,
    {
        let loading_key = format!("create_{}", T::COLLECTION);
        self.set_loading(&loading_key, true);

        let outcome = async {
            let mut records = self.load_collection::<T>().await?;
            let record = make(generate_id());
            records.push(record.clone());
            self.adapter.write_collection(T::COLLECTION, &records).await?;
            Ok::<T, RepoError>(record)
        }
        .await;

        self.simulate_latency().await;
        self.set_loading(&loading_key, false);

        match outcome {
            Ok(record) => {
                tracing::debug!(collection = T::COLLECTION, id = record.id(), "record created");
                ApiResponse::ok_with_message(
                    record,
                    format!("{} created successfully", T::COLLECTION),
                )
            }
            Err(err) => ApiResponse::fail(format!("Failed to create {}: {}", T::COLLECTION, err)),
        }
    }

    /// Merge-patch an existing record. An absent id is a failure, unlike
    /// `get_by_id`; the loading flag is still cleared on that path.
    pub async fn update<T, P>(&self, id: &str, patch: P) -> ApiResponse<T>
    where
        T: Entity,
        P: Patch<T>,
    {
        let loading_key = format!("update_{}_{}", T::COLLECTION, id);
        self.set_loading(&loading_key, true);

        let outcome = async {
            let mut records = self.load_collection::<T>().await?;
            let position = records
                .iter()
                .position(|record| record.id() == id)
                .ok_or_else(|| RepoError::NotFound {
                    entity: T::COLLECTION,
                    id: id.to_string(),
                })?;

            patch.apply(&mut records[position]);
            let updated = records[position].clone();
            self.adapter.write_collection(T::COLLECTION, &records).await?;
            Ok::<T, RepoError>(updated)
        }
        .await;

        self.simulate_latency().await;
        self.set_loading(&loading_key, false);

        match outcome {
            Ok(record) => ApiResponse::ok_with_message(
                record,
                format!("{} updated successfully", T::COLLECTION),
            ),
            Err(err) => ApiResponse::fail(format!("Failed to update {}: {}", T::COLLECTION, err)),
        }
    }

    /// Remove a record by id. Failure when nothing was removed.
    pub async fn delete<T: Entity>(&self, id: &str) -> ApiResponse<bool> {
        let loading_key = format!("delete_{}_{}", T::COLLECTION, id);
        self.set_loading(&loading_key, true);

        let outcome = async {
            let records = self.load_collection::<T>().await?;
            let remaining: Vec<T> = records
                .iter()
                .filter(|record| record.id() != id)
                .cloned()
                .collect();

            if remaining.len() == records.len() {
                return Err(RepoError::NotFound {
                    entity: T::COLLECTION,
                    id: id.to_string(),
                });
            }

            self.adapter.write_collection(T::COLLECTION, &remaining).await?;
            Ok::<(), RepoError>(())
        }
        .await;

        self.simulate_latency().await;
        self.set_loading(&loading_key, false);

        match outcome {
            Ok(()) => ApiResponse::ok_with_message(
                true,
                format!("{} deleted successfully", T::COLLECTION),
            ),
            Err(err) => ApiResponse::fail_with(
                false,
                format!("Failed to delete {}: {}", T::COLLECTION, err),
            ),
        }
    }
}

/// Mint a record id: current time in base36 plus a random suffix. Unique
/// enough for a single process; not suitable for distributed use.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u128;
    let random = Uuid::new_v4().simple().to_string();
    format!("{}{}", to_base36(millis), &random[..10])
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
