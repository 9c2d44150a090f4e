//! Policy services composed from domain functions and ports.

mod rate_limit;
mod revalidation;
mod waitlist;

pub use rate_limit::{DEFAULT_CHECK_TIMEOUT, RateLimitGuard};
pub use revalidation::{RevalidationDispatcher, RevalidationReport};
pub use waitlist::WaitlistService;
