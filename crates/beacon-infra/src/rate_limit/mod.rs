//! Rate limit store implementations.

mod memory;

pub use memory::InMemoryRateLimitStore;

#[cfg(feature = "redis")]
mod redis;
#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisRateLimitStore};
