//! # Beacon Core
//!
//! The policy layer of the Beacon marketing backend.
//! This crate decides whether an inbound write or cache-invalidation request
//! is accepted, rate-limited or rejected. It has zero infrastructure dependencies;
//! stores and caches are reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod identity;
pub mod ports;
pub mod services;
pub mod verification;

pub use error::{DomainError, RepoError};
pub use identity::client_identifier;
pub use verification::SecretVerification;
