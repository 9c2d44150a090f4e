//! # Beacon Infrastructure
//!
//! Concrete implementations of the ports defined in `beacon-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL waitlist storage via SeaORM
//! - `redis` - Redis sliding-window rate limit store
//! - `http-revalidate` - HTTP client for the frontend's revalidation hook

pub mod database;
pub mod rate_limit;
pub mod revalidate;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryWaitlistRepository};
pub use rate_limit::InMemoryRateLimitStore;
pub use revalidate::InMemoryPathRevalidator;

#[cfg(feature = "postgres")]
pub use database::PostgresWaitlistRepository;

#[cfg(feature = "redis")]
pub use rate_limit::{RedisConfig, RedisRateLimitStore};

#[cfg(feature = "http-revalidate")]
pub use revalidate::{HttpPathRevalidator, HttpRevalidatorConfig};
