//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod fixtures;
mod store;

pub use fixtures::FixtureSource;
pub use store::CollectionStore;
