//! Static in-memory fixture source - handy for tests and embedded
//! deployments that compile fixtures in.

use std::collections::HashMap;

use async_trait::async_trait;

use ellaia_core::FixtureError;
use ellaia_core::ports::FixtureSource;

#[derive(Default)]
pub struct StaticFixtures {
    assets: HashMap<String, String>,
}

impl StaticFixtures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.assets.insert(name.into(), raw.into());
        self
    }
}

#[async_trait]
impl FixtureSource for StaticFixtures {
    async fn load(&self, name: &str) -> Result<String, FixtureError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| FixtureError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_registered_assets_only() {
        let fixtures = StaticFixtures::new().with("tags", "[]");
        assert_eq!(fixtures.load("tags").await.unwrap(), "[]");
        assert!(fixtures.load("posts").await.is_err());
    }
}
