//! Rate limit response headers.

use actix_web::HttpResponseBuilder;

use beacon_core::domain::RateLimitDecision;

pub const LIMIT_HEADER: &str = "X-RateLimit-Limit";
pub const REMAINING_HEADER: &str = "X-RateLimit-Remaining";
pub const RESET_HEADER: &str = "X-RateLimit-Reset";

/// Attach `X-RateLimit-*` headers for a decision made by a store.
/// Fail-open decisions carry no limit and add nothing.
pub fn insert_rate_limit_headers(builder: &mut HttpResponseBuilder, decision: &RateLimitDecision) {
    if !decision.is_enforced() {
        return;
    }
    builder
        .insert_header((LIMIT_HEADER, decision.limit.to_string()))
        .insert_header((REMAINING_HEADER, decision.remaining.to_string()))
        .insert_header((RESET_HEADER, decision.reset_at_epoch_ms.to_string()));
}
