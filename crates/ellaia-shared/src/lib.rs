//! # Ellaia Shared
//!
//! Types shared between the data services and their consumers.
//! The view layer depends on the [`ApiResponse`] shape only, never on the
//! storage mechanism behind it, so a swap to a real backend leaves
//! consumers untouched.

pub mod response;

pub use response::ApiResponse;
