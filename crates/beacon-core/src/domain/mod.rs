//! Domain entities and pure policy functions.

mod rate_limit;
mod revalidation;
mod waitlist;

pub use rate_limit::{RateLimitDecision, WindowSpec};
pub use revalidation::{RevalidationTarget, WebhookEvent, compute_targets};
pub use waitlist::{Email, JoinOutcome, WaitlistEntry};
