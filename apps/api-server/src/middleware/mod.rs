//! Request extractors and response helpers shared by handlers.

pub mod error;
pub mod identity;
pub mod rate_limit;
