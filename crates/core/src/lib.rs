//! Domain layer of the GTM consultation gateway.
//!
//! Holds everything between the HTTP surface and the remote automation
//! platform: request validation, the [`platform::ActorPlatform`] capability
//! trait, the job invoker, the result mapper and the error taxonomy. Nothing
//! in this crate speaks HTTP directly.

pub mod classify;
pub mod consultation;
pub mod error;
pub mod invoker;
pub mod links;
pub mod mapper;
pub mod platform;
pub mod run;
pub mod service;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
