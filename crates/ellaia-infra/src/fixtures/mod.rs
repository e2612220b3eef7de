//! Fixture source implementations.

mod dir;
mod memory;

pub use dir::DirFixtures;
pub use memory::StaticFixtures;
