//! Fail-open rate-limit guard.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{RateLimitDecision, WindowSpec};
use crate::ports::{RateLimitError, RateLimitStore};

/// Default bound on a single store round-trip.
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Applies one window policy on top of a shared [`RateLimitStore`].
///
/// A store failure never becomes a failure of the guarded feature: errors and
/// timeouts are logged and turned into [`RateLimitDecision::fail_open`].
pub struct RateLimitGuard {
    store: Arc<dyn RateLimitStore>,
    policy_name: &'static str,
    window: WindowSpec,
    timeout: Duration,
}

impl RateLimitGuard {
    pub fn new(store: Arc<dyn RateLimitStore>, policy_name: &'static str, window: WindowSpec) -> Self {
        Self {
            store,
            policy_name,
            window,
            timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }

    /// Guard for waitlist signups (5 per rolling hour).
    pub fn waitlist(store: Arc<dyn RateLimitStore>) -> Self {
        Self::new(store, "waitlist", WindowSpec::waitlist())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Check and count one attempt for `identifier`.
    pub async fn check_rate_limit(&self, identifier: &str) -> RateLimitDecision {
        let key = format!("{}:{}", self.policy_name, identifier);

        let result = match tokio::time::timeout(
            self.timeout,
            self.store.increment_and_check(&key, &self.window),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RateLimitError::Timeout(self.timeout)),
        };

        match result {
            Ok(decision) => {
                if !decision.success {
                    tracing::warn!(
                        policy = self.policy_name,
                        identifier = %identifier,
                        reset_at_epoch_ms = decision.reset_at_epoch_ms,
                        "Rate limit exceeded"
                    );
                }
                decision
            }
            Err(e) => {
                tracing::error!(
                    policy = self.policy_name,
                    backend = self.store.backend(),
                    error = %e,
                    "Rate limit store unavailable, failing open"
                );
                RateLimitDecision::fail_open()
            }
        }
    }
}
