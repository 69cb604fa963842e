//! Apify REST API v2 client.
//!
//! Implements [`gtm_core::platform::ActorPlatform`] on top of [`reqwest`]:
//! starting actor runs, waiting for them to finish, and reading the
//! dataset and key-value store each run produces.

pub mod client;
pub mod error;

pub use client::ApifyClient;
pub use error::ApifyError;
