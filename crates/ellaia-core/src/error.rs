//! Error types, one enum per layer.

use thiserror::Error;

/// Domain errors - business-rule failures raised before any I/O.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Failures of the underlying key/value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage backend failed: {0}")]
    Backend(String),

    #[error("Corrupt collection payload: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Failures loading a bundled fixture asset.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Fixture not found: {0}")]
    NotFound(String),

    #[error("Fixture unreadable: {0}")]
    Io(String),

    #[error("Fixture payload invalid: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Repository-level errors. These never escape the repository's async
/// operations - every one is converted into a failed `ApiResponse`.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Fixture(#[from] FixtureError),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },
}
