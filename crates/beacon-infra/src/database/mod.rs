//! Waitlist storage - PostgreSQL and in-memory fallback.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_repo;

pub use connections::DatabaseConfig;
pub use memory::InMemoryWaitlistRepository;

#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresWaitlistRepository;

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
