//! Directory-based fixture source, the bundled-asset convention:
//! `<root>/<name>.json`.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use ellaia_core::FixtureError;
use ellaia_core::ports::FixtureSource;

pub struct DirFixtures {
    root: PathBuf,
}

impl DirFixtures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FixtureSource for DirFixtures {
    async fn load(&self, name: &str) -> Result<String, FixtureError> {
        let path = self.root.join(format!("{name}.json"));
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(raw),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(FixtureError::NotFound(path.display().to_string()))
            }
            Err(err) => Err(FixtureError::Io(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_existing_asset() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("tags.json"), "[]")
            .await
            .unwrap();

        let fixtures = DirFixtures::new(dir.path());
        assert_eq!(fixtures.load("tags").await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn missing_asset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let fixtures = DirFixtures::new(dir.path());
        assert!(matches!(
            fixtures.load("posts").await,
            Err(FixtureError::NotFound(_))
        ));
    }
}
