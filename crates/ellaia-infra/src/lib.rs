//! # Ellaia Infrastructure
//!
//! Concrete implementations of the ports defined in `ellaia-core`:
//! key/value stores and fixture sources. The in-memory variants lose
//! everything on process exit; the file-backed variants stand in for
//! browser local storage.

pub mod fixtures;
pub mod store;

pub use fixtures::{DirFixtures, StaticFixtures};
pub use store::{FileStore, MemoryStore};
