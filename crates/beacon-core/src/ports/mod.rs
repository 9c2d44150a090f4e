//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod rate_limit;
mod repository;
mod revalidate;

pub use rate_limit::{RateLimitError, RateLimitStore};
pub use repository::WaitlistRepository;
pub use revalidate::{PathRevalidator, RevalidationError};
