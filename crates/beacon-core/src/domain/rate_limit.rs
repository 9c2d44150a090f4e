use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sliding window a rate-limit key is counted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    /// Accepted operations allowed inside one window.
    pub max_requests: u32,
    /// Length of the rolling window.
    pub window: Duration,
}

impl WindowSpec {
    pub const fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// Waitlist signups: 5 per rolling hour.
    pub const fn waitlist() -> Self {
        Self::new(5, Duration::from_secs(60 * 60))
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Outcome of one rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitDecision {
    pub success: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at_epoch_ms: i64,
}

impl RateLimitDecision {
    /// Decision returned when the store could not be consulted.
    pub const fn fail_open() -> Self {
        Self {
            success: true,
            limit: 0,
            remaining: 0,
            reset_at_epoch_ms: 0,
        }
    }

    /// Whether the decision came from a store (fail-open decisions carry no limit).
    pub fn is_enforced(&self) -> bool {
        self.limit > 0
    }

    /// Seconds from `now_epoch_ms` until the window resets, rounded up.
    pub fn retry_after_secs(&self, now_epoch_ms: i64) -> u64 {
        let remaining_ms = (self.reset_at_epoch_ms - now_epoch_ms).max(0) as u64;
        remaining_ms.div_ceil(1000)
    }
}
