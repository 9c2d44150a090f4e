//! Rate limiting port.

use async_trait::async_trait;

use crate::domain::{RateLimitDecision, WindowSpec};

/// Store holding sliding-window counters shared by every server instance.
///
/// Implementations must make the increment and the window check one atomic
/// step per key; callers issue exactly one call per request.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record an attempt for `key` and decide whether it fits in the window.
    async fn increment_and_check(
        &self,
        key: &str,
        window: &WindowSpec,
    ) -> Result<RateLimitDecision, RateLimitError>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

/// Rate limit store errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Store did not respond within {0:?}")]
    Timeout(std::time::Duration),
}
