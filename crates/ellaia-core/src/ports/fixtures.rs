use async_trait::async_trait;

use crate::error::FixtureError;

/// Source of bundled fixture assets, one JSON array per entity name.
///
/// The convention mirrors the original static assets: `<name>.json` under
/// a fixture root such as `assets/mock-data/`.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// Load the raw JSON array for `name`.
    async fn load(&self, name: &str) -> Result<String, FixtureError>;
}
