//! # Ellaia Core
//!
//! The data layer of the Ellaia community platform: a simulated REST API
//! over a persisted key/value store, seeded from bundled JSON fixtures.
//! This crate contains the domain model, the storage and fixture ports,
//! the generic entity repository and the entity services. It has zero
//! infrastructure dependencies; concrete stores live in `ellaia-infra`.
//!
//! Known limitation: concurrent writers (two processes over the same
//! file-backed store) race with last-write-wins and no merge. The layer
//! targets a single logical consumer, matching its demo scope.

pub mod domain;
pub mod error;
pub mod ports;
pub mod repository;
pub mod services;
pub mod store;

pub use error::{DomainError, FixtureError, RepoError, StoreError};
pub use repository::{Entity, Patch, Repository, RepositoryConfig};
pub use store::StoreAdapter;

#[cfg(test)]
pub(crate) mod testutil;
